//! Logical asset paths
//! Case-folded, forward-slash relative paths used as lookup keys for asset files.

use std::fmt;
use std::path::{Component, Path};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A normalized relative asset path.
///
/// Construction trims whitespace and surrounding quotes, turns backslashes
/// into forward slashes, collapses repeated separators, drops leading `/` and
/// `./` and lower-cases the result. Two references name the same asset iff
/// their `LogicalPath`s are equal.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub struct LogicalPath(String);

impl LogicalPath {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let trimmed = raw.as_ref().trim().trim_matches('"').trim();
        let mut out = String::with_capacity(trimmed.len());
        for segment in trimmed.split(['/', '\\']) {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(segment);
        }
        LogicalPath(out.to_lowercase())
    }

    /// Build from a filesystem path relative to an asset root.
    pub fn from_relative(path: &Path) -> Self {
        let joined = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        LogicalPath::new(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// File name without its last extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }

    /// Extension of the last segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(dot) => Some(&name[dot + 1..]),
        }
    }

    /// `ext` may be given with or without a leading dot, in any case.
    pub fn has_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extension()
            .is_some_and(|own| own.eq_ignore_ascii_case(ext))
    }

    /// The whole path with the last extension removed.
    pub fn without_extension(&self) -> &str {
        let name_len = self.file_name().len();
        let stem_len = self.file_stem().len();
        &self.0[..self.0.len() - (name_len - stem_len)]
    }

    /// Directory part, `None` for top-level files.
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|slash| &self.0[..slash])
    }

    /// True when the first segment equals `dir` (compared case-insensitively).
    pub fn starts_with_dir(&self, dir: &str) -> bool {
        let dir = LogicalPath::new(dir);
        if dir.is_empty() {
            return true;
        }
        self.0.len() > dir.0.len()
            && self.0.starts_with(&dir.0)
            && self.0.as_bytes()[dir.0.len()] == b'/'
    }

    /// Path with a leading `dir/` removed when present.
    pub fn strip_dir(&self, dir: &str) -> &str {
        if self.starts_with_dir(dir) {
            let dir_len = LogicalPath::new(dir).0.len();
            &self.0[dir_len + 1..]
        } else {
            &self.0
        }
    }

    /// Appends raw text (e.g. `.vvd`) to the path.
    pub fn with_suffix(&self, suffix: &str) -> LogicalPath {
        LogicalPath::new(format!("{}{}", self.0, suffix))
    }

    /// Appends `.ext` unless the path already has that extension.
    pub fn ensure_extension(self, ext: &str) -> LogicalPath {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() || self.has_extension(ext) {
            self
        } else {
            self.with_suffix(&format!(".{ext}"))
        }
    }

    /// Prepends `dir/` unless the path is already below `dir`.
    pub fn ensure_prefix(self, dir: &str) -> LogicalPath {
        if self.starts_with_dir(dir) {
            self
        } else {
            LogicalPath::new(format!("{dir}/{}", self.0))
        }
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicalPath({:?})", self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LogicalPath {
    fn from(raw: &str) -> Self {
        LogicalPath::new(raw)
    }
}

impl From<String> for LogicalPath {
    fn from(raw: String) -> Self {
        LogicalPath::new(raw)
    }
}

impl From<LogicalPath> for String {
    fn from(path: LogicalPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalization() {
        assert_eq!(
            LogicalPath::new("Models\\Props//Chair.MDL").as_str(),
            "models/props/chair.mdl"
        );
        assert_eq!(LogicalPath::new(" \"./materials/wood\" ").as_str(), "materials/wood");
        assert_eq!(LogicalPath::new("/materials/./a.vmt").as_str(), "materials/a.vmt");
        assert!(LogicalPath::new("  \"\" ").is_empty());
    }

    #[test]
    fn test_equality_ignores_case_and_separators() {
        assert_eq!(
            LogicalPath::new("Models/Foo.vmt"),
            LogicalPath::new("models\\foo.VMT")
        );
    }

    #[test]
    fn test_from_relative() {
        let rel: PathBuf = ["Materials", "Wood", "Diffuse.vtf"].iter().collect();
        assert_eq!(
            LogicalPath::from_relative(&rel).as_str(),
            "materials/wood/diffuse.vtf"
        );
    }

    #[test]
    fn test_name_parts() {
        let p = LogicalPath::new("models/props/chair.dx90.vtx");
        assert_eq!(p.file_name(), "chair.dx90.vtx");
        assert_eq!(p.file_stem(), "chair.dx90");
        assert_eq!(p.extension(), Some("vtx"));
        assert_eq!(p.parent(), Some("models/props"));
        assert_eq!(p.without_extension(), "models/props/chair.dx90");

        let top = LogicalPath::new("readme");
        assert_eq!(top.extension(), None);
        assert_eq!(top.parent(), None);
        assert_eq!(top.without_extension(), "readme");
    }

    #[test]
    fn test_ensure_extension_and_prefix() {
        let p = LogicalPath::new("wood/diffuse")
            .ensure_extension("vtf")
            .ensure_prefix("materials");
        assert_eq!(p.as_str(), "materials/wood/diffuse.vtf");

        let already = LogicalPath::new("Materials/wood/diffuse.VTF")
            .ensure_extension(".vtf")
            .ensure_prefix("materials");
        assert_eq!(already.as_str(), "materials/wood/diffuse.vtf");
    }

    #[test]
    fn test_starts_with_dir_needs_whole_segment() {
        let p = LogicalPath::new("materialsx/a.vmt");
        assert!(!p.starts_with_dir("materials"));
        assert!(LogicalPath::new("materials/a.vmt").starts_with_dir("Materials"));
        assert_eq!(LogicalPath::new("models/a.mdl").strip_dir("models"), "a.mdl");
        assert_eq!(LogicalPath::new("props/a.mdl").strip_dir("models"), "props/a.mdl");
    }

    #[test]
    fn test_debug_repr() {
        let p = LogicalPath::new("Materials/A.vmt");
        assert_eq!(format!("{p:?}"), "LogicalPath(\"materials/a.vmt\")");
        assert_eq!(p.to_string(), "materials/a.vmt");
    }
}
