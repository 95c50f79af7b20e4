//! Writing one model's closure into its own `EXPORTED<n>` folder.

use crate::util::slash_path;
use log::{debug, warn};
use mdlsplit_error::MdlSplitError;
use mdlsplit_tracer::{FileRole, ResolutionResult};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const EXPORT_PREFIX: &str = "EXPORTED";
pub const SPLIT_MANIFEST: &str = "split_manifest.json";
pub const ADDON_MANIFEST: &str = "addon.json";

static EXPORT_DIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{EXPORT_PREFIX}\s*(\d+)$")).expect("export dir pattern is valid")
});

/// Number of an `EXPORTED<n>` folder name (case-insensitive, optional
/// whitespace before the number).
pub fn export_dir_number(name: &str) -> Option<u64> {
    EXPORT_DIR_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|n| n.as_str().parse().ok())
}

pub fn is_export_dir_name(name: &str) -> bool {
    export_dir_number(name).is_some()
}

pub fn export_name(number: u64) -> String {
    format!("{EXPORT_PREFIX}{number}")
}

/// One past the highest existing export number under `parent`, or 1.
pub fn next_export_number(parent: &Path) -> Result<u64, MdlSplitError> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(1),
        Err(err) => return Err(MdlSplitError::from(err).with_file_path(parent)),
    };
    let highest = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| export_dir_number(&entry.file_name().to_string_lossy()))
        .max()
        .unwrap_or(0);
    Ok(highest + 1)
}

/// Create the next free `EXPORTED<n>` folder under `parent`, advancing
/// `next` past every name it tried.
pub fn allocate_export_dir(parent: &Path, next: &mut u64) -> Result<PathBuf, MdlSplitError> {
    fs::create_dir_all(parent).map_err(|err| {
        MdlSplitError::export_create_dir_failed(err.to_string()).with_file_path(parent)
    })?;
    loop {
        let dir = parent.join(export_name(*next));
        *next += 1;
        match fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!("{} already exists, trying the next number", dir.display());
            }
            Err(err) => {
                return Err(
                    MdlSplitError::export_create_dir_failed(err.to_string()).with_file_path(dir)
                );
            }
        }
    }
}

/// Contents of `split_manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitManifest {
    pub model: String,
    pub copied_files: Vec<String>,
    pub missing: Vec<String>,
}

/// Contents of `addon.json`, enough for the folder to pack as an addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonManifest {
    pub title: String,
    #[serde(rename = "type")]
    pub addon_type: String,
    pub tags: Vec<String>,
    pub ignore: Vec<String>,
}

impl AddonManifest {
    pub fn for_model(stem: &str) -> Self {
        Self {
            title: format!("{stem} (exported)"),
            addon_type: "model".to_string(),
            tags: vec!["model".to_string(), "prop".to_string()],
            ignore: [".psd", ".db", ".blend1", ".md"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub dir: PathBuf,
    pub manifest: SplitManifest,
}

/// Copy every resolved file into `dir`, keeping paths relative to the
/// asset root, and write both manifests.
///
/// A file that fails to copy is logged and listed as missing. Only
/// manifest write failures are errors.
pub fn export_model(result: &ResolutionResult, dir: &Path) -> Result<ExportReport, MdlSplitError> {
    let mut copied = BTreeSet::new();
    let mut missing: BTreeSet<String> = result
        .missing_refs
        .iter()
        .map(|m| m.logical_path.to_string())
        .collect();

    for file in &result.resolved_files {
        let relative = slash_path(&file.relative_path);
        match copy_file(&file.real_path, &dir.join(&file.relative_path)) {
            Ok(()) => {
                copied.insert(relative);
            }
            Err(err) => {
                warn!("{}", err.user_message());
                missing.insert(relative);
            }
        }
    }

    let model_file = result.files_with_role(FileRole::Model).next();
    let model = model_file
        .map(|f| slash_path(&f.relative_path))
        .unwrap_or_else(|| result.model.to_string());
    let stem = model_file
        .and_then(|f| f.relative_path.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| result.model.file_stem().to_string());

    let manifest = SplitManifest {
        model,
        copied_files: copied.into_iter().collect(),
        missing: missing.into_iter().collect(),
    };
    write_json(&dir.join(SPLIT_MANIFEST), &manifest)?;
    write_json(&dir.join(ADDON_MANIFEST), &AddonManifest::for_model(&stem))?;

    Ok(ExportReport {
        dir: dir.to_path_buf(),
        manifest,
    })
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), MdlSplitError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            MdlSplitError::export_copy_failed(err.to_string()).with_file_path(parent)
        })?;
    }
    fs::copy(src, dst)
        .map_err(|err| MdlSplitError::export_copy_failed(err.to_string()).with_file_path(src))?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), MdlSplitError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| MdlSplitError::export_manifest_failed(err.to_string()))?;
    fs::write(path, json).map_err(|err| {
        MdlSplitError::export_manifest_failed(err.to_string()).with_file_path(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdlsplit_tracer::{DependencyCollector, LogicalPath, PathIndex};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_export_dir_number() {
        assert_eq!(export_dir_number("EXPORTED1"), Some(1));
        assert_eq!(export_dir_number("exported 12"), Some(12));
        assert_eq!(export_dir_number("Exported\t3"), Some(3));
        assert_eq!(export_dir_number("EXPORTED"), None);
        assert_eq!(export_dir_number("EXPORTED1_old"), None);
        assert_eq!(export_dir_number("my EXPORTED1"), None);
    }

    #[test]
    fn test_next_export_number() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(next_export_number(tmp.path()).unwrap(), 1);
        assert_eq!(next_export_number(&tmp.path().join("absent")).unwrap(), 1);

        fs::create_dir(tmp.path().join("EXPORTED2")).unwrap();
        fs::create_dir(tmp.path().join("exported 7")).unwrap();
        fs::create_dir(tmp.path().join("EXPORTEDx")).unwrap();
        fs::write(tmp.path().join("EXPORTED40"), b"a file, not a folder").unwrap();
        assert_eq!(next_export_number(tmp.path()).unwrap(), 8);
    }

    #[test]
    fn test_allocate_skips_taken_names() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("EXPORTED1")).unwrap();
        fs::create_dir(tmp.path().join("EXPORTED2")).unwrap();

        let mut next = 1;
        let first = allocate_export_dir(tmp.path(), &mut next).unwrap();
        let second = allocate_export_dir(tmp.path(), &mut next).unwrap();
        assert_eq!(first, tmp.path().join("EXPORTED3"));
        assert_eq!(second, tmp.path().join("EXPORTED4"));
        assert_eq!(next, 5);
    }

    #[test]
    fn test_addon_manifest_json() {
        let json = serde_json::to_value(AddonManifest::for_model("Chair")).unwrap();
        assert_eq!(json["title"], "Chair (exported)");
        assert_eq!(json["type"], "model");
        assert_eq!(json["tags"], serde_json::json!(["model", "prop"]));
        assert_eq!(
            json["ignore"],
            serde_json::json!([".psd", ".db", ".blend1", ".md"])
        );
    }

    #[test]
    fn test_export_model_copies_closure() {
        let src = TempDir::new().unwrap();
        write(src.path(), "models/Chair.mdl", b"\0materials/wood.vmt\0");
        write(src.path(), "models/Chair.vvd", b"IDSV");
        write(
            src.path(),
            "materials/wood.vmt",
            b"x { $basetexture wood/diffuse $bumpmap wood/bump }",
        );
        write(src.path(), "materials/wood/diffuse.vtf", b"VTF");
        let index = PathIndex::build(src.path()).unwrap();
        let result = DependencyCollector::new(&index)
            .collect(&LogicalPath::new("models/chair.mdl"))
            .unwrap();

        let out = TempDir::new().unwrap();
        let mut next = next_export_number(out.path()).unwrap();
        let dir = allocate_export_dir(out.path(), &mut next).unwrap();
        let report = export_model(&result, &dir).unwrap();

        assert_eq!(report.dir, out.path().join("EXPORTED1"));
        assert_eq!(report.manifest.model, "models/Chair.mdl");
        assert_eq!(
            report.manifest.copied_files,
            vec![
                "materials/wood.vmt",
                "materials/wood/diffuse.vtf",
                "models/Chair.mdl",
                "models/Chair.vvd",
            ]
        );
        assert_eq!(report.manifest.missing, vec!["materials/wood/bump.vtf"]);
        assert_eq!(fs::read(dir.join("models/Chair.vvd")).unwrap(), b"IDSV");
        assert_eq!(
            fs::read(dir.join("materials/wood/diffuse.vtf")).unwrap(),
            b"VTF"
        );

        let split: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(SPLIT_MANIFEST)).unwrap()).unwrap();
        assert_eq!(split["model"], "models/Chair.mdl");
        assert_eq!(split["missing"], serde_json::json!(["materials/wood/bump.vtf"]));

        let addon: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(ADDON_MANIFEST)).unwrap()).unwrap();
        assert_eq!(addon["title"], "Chair (exported)");
    }

    #[test]
    fn test_copy_failure_is_listed_as_missing() {
        let src = TempDir::new().unwrap();
        write(src.path(), "models/box.mdl", b"");
        write(src.path(), "models/box.phy", b"");
        let index = PathIndex::build(src.path()).unwrap();
        let result = DependencyCollector::new(&index)
            .collect(&LogicalPath::new("models/box.mdl"))
            .unwrap();
        fs::remove_file(src.path().join("models/box.phy")).unwrap();

        let out = TempDir::new().unwrap();
        let report = export_model(&result, out.path()).unwrap();
        assert_eq!(report.manifest.copied_files, vec!["models/box.mdl"]);
        assert_eq!(report.manifest.missing, vec!["models/box.phy"]);
    }
}
