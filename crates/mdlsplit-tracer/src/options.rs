//! Options controlling how model dependencies are discovered.

use mdlsplit_error::{MdlSplitError, Result};
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Files copied next to a model when they share its base name.
pub const DEFAULT_SIDECAR_EXTENSIONS: &[&str] = &[
    ".vvd", ".phy", ".ani", ".vtx", ".dx80.vtx", ".dx90.vtx", ".sw.vtx",
];

/// Material keys whose value names a texture.
pub const DEFAULT_TEXTURE_KEYS: &[&str] = &[
    "basetexture",
    "basetexture2",
    "bumpmap",
    "bumpmap2",
    "normalmap",
    "phongexponenttexture",
    "phongwarptexture",
    "lightwarptexture",
    "detail",
    "envmapmask",
    "selfillummask",
    "ambientoccltexture",
    "blendmodulatetexture",
    "albedo",
    "heightmap",
    "mraotexture",
    "roughnesstexture",
    "metalictexture",
    "iris",
    "corneatexture",
];

/// Options to control dependency discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CollectorOptions {
    /// Suffixes appended to the model path (minus `.mdl`) to find sidecars.
    pub sidecar_extensions: Vec<String>,
    /// Texture-bearing material keys, without `$`, lower case.
    pub texture_keys: BTreeSet<String>,
    /// Key whose value names another material to include.
    pub include_keyword: String,
    /// Shortest byte run the model scanner keeps.
    pub min_token_len: usize,
    /// Directory all material and texture references are rooted at.
    pub material_root: String,
    pub material_extension: String,
    pub texture_extension: String,
    /// Also try materials named after the model's directory and stem.
    pub name_hints: bool,
    /// Also scan sidecar files for material references.
    pub scan_sidecars: bool,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            sidecar_extensions: DEFAULT_SIDECAR_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            texture_keys: DEFAULT_TEXTURE_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
            include_keyword: "include".to_string(),
            min_token_len: 4,
            material_root: "materials".to_string(),
            material_extension: "vmt".to_string(),
            texture_extension: "vtf".to_string(),
            name_hints: false,
            scan_sidecars: false,
        }
    }
}

impl CollectorOptions {
    /// Normalize user-supplied values and reject unusable ones.
    pub fn validate(self) -> Result<Self> {
        if self.min_token_len == 0 {
            return Err(MdlSplitError::config_invalid_value(
                "min_token_len must be at least 1",
            ));
        }
        let include_keyword = normalize_key(&self.include_keyword);
        if include_keyword.is_empty() {
            return Err(MdlSplitError::config_invalid_value(
                "include_keyword must not be empty",
            ));
        }
        let material_extension = self.material_extension.trim_start_matches('.').to_lowercase();
        let texture_extension = self.texture_extension.trim_start_matches('.').to_lowercase();
        if material_extension.is_empty() || texture_extension.is_empty() {
            return Err(MdlSplitError::config_invalid_value(
                "material_extension and texture_extension must not be empty",
            ));
        }
        let material_root = self.material_root.trim_matches(['/', '\\']).to_lowercase();
        if material_root.is_empty() {
            return Err(MdlSplitError::config_invalid_value(
                "material_root must not be empty",
            ));
        }

        let sidecar_extensions = self
            .sidecar_extensions
            .iter()
            .map(|ext| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        let texture_keys = self
            .texture_keys
            .iter()
            .map(|key| normalize_key(key))
            .filter(|key| !key.is_empty())
            .collect();

        Ok(Self {
            sidecar_extensions,
            texture_keys,
            include_keyword,
            material_root,
            material_extension,
            texture_extension,
            ..self
        })
    }
}

/// Material keys compare without their `$`/`%` sigil and case.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_matches('"')
        .trim_start_matches(['$', '%'])
        .to_ascii_lowercase()
}
