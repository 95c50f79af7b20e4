use crate::index::IndexEntry;
use crate::lpath::LogicalPath;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a file belongs to a model's closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FileRole {
    Model,
    Sidecar,
    Material,
    Texture,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileRole::Model => "model",
            FileRole::Sidecar => "sidecar",
            FileRole::Material => "material",
            FileRole::Texture => "texture",
        })
    }
}

/// A file that exists and must be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedFile {
    pub logical_path: LogicalPath,
    pub real_path: PathBuf,
    /// On-disk path relative to the asset root, original case.
    pub relative_path: PathBuf,
    pub role: FileRole,
}

impl ResolvedFile {
    pub fn new(logical_path: LogicalPath, entry: &IndexEntry, role: FileRole) -> Self {
        Self {
            logical_path,
            real_path: entry.real_path.clone(),
            relative_path: entry.relative_path.clone(),
            role,
        }
    }
}

/// A reference that passed parsing but did not resolve to a readable file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissingRef {
    pub logical_path: LogicalPath,
    /// The material (or model) the reference came from.
    pub referenced_by: LogicalPath,
}

impl MissingRef {
    pub fn new(logical_path: LogicalPath, referenced_by: LogicalPath) -> Self {
        Self {
            logical_path,
            referenced_by,
        }
    }
}

/// Everything one model needs, plus what could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolutionResult {
    pub model: LogicalPath,
    /// Unique by logical path, ordered by role then path.
    pub resolved_files: Vec<ResolvedFile>,
    /// Ordered by path then referencing file.
    pub missing_refs: Vec<MissingRef>,
}

impl ResolutionResult {
    /// Assemble a result. References that also appear among the resolved
    /// files are dropped from the missing list.
    pub fn new(
        model: LogicalPath,
        files: BTreeMap<LogicalPath, ResolvedFile>,
        missing: BTreeSet<MissingRef>,
    ) -> Self {
        let missing_refs = missing
            .into_iter()
            .filter(|m| !files.contains_key(&m.logical_path))
            .collect();
        let mut resolved_files: Vec<ResolvedFile> = files.into_values().collect();
        resolved_files.sort_by(|a, b| {
            a.role
                .cmp(&b.role)
                .then_with(|| a.logical_path.cmp(&b.logical_path))
        });
        Self {
            model,
            resolved_files,
            missing_refs,
        }
    }

    pub fn files_with_role(&self, role: FileRole) -> impl Iterator<Item = &ResolvedFile> {
        self.resolved_files.iter().filter(move |f| f.role == role)
    }

    pub fn sidecars(&self) -> impl Iterator<Item = &ResolvedFile> {
        self.files_with_role(FileRole::Sidecar)
    }

    pub fn materials(&self) -> impl Iterator<Item = &ResolvedFile> {
        self.files_with_role(FileRole::Material)
    }

    pub fn textures(&self) -> impl Iterator<Item = &ResolvedFile> {
        self.files_with_role(FileRole::Texture)
    }

    /// Whether `path` (normalized first) is among the resolved files.
    pub fn contains(&self, path: &str) -> bool {
        let path = LogicalPath::new(path);
        self.resolved_files.iter().any(|f| f.logical_path == path)
    }

    /// True when nothing referenced went missing.
    pub fn is_complete(&self) -> bool {
        self.missing_refs.is_empty()
    }
}
