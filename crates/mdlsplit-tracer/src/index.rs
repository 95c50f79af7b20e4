//! Case-insensitive index of every file below an asset root.

use crate::lpath::LogicalPath;
use log::{debug, trace, warn};
use mdlsplit_error::{MdlSplitError, Result};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where an indexed file lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Full path, usable for reading and copying.
    pub real_path: PathBuf,
    /// Path relative to the asset root, in its on-disk case.
    pub relative_path: PathBuf,
}

/// Immutable `LogicalPath -> file` map built by one walk of the asset root.
///
/// Two files that normalize to the same logical path (e.g. `Foo.vmt` and
/// `foo.vmt` on a case-sensitive filesystem) collide. The walk visits entries
/// sorted by file name and the first one seen wins; later ones are only
/// counted in [`PathIndex::collisions`].
#[derive(Debug, Clone)]
pub struct PathIndex {
    root: PathBuf,
    entries: BTreeMap<LogicalPath, IndexEntry>,
    collisions: usize,
}

impl PathIndex {
    /// Index every file below `root`.
    pub fn build<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::build_filtered(root, |_| true)
    }

    /// Index every file below `root`, skipping entries (and whole
    /// directories) for which `keep` returns false. `keep` receives paths
    /// relative to `root`.
    pub fn build_filtered<P, F>(root: P, mut keep: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> bool,
    {
        let root = root.as_ref();
        let metadata = fs::metadata(root).map_err(|err| match err.kind() {
            ErrorKind::NotFound => MdlSplitError::index_root_missing(root),
            _ => MdlSplitError::index_root_unreadable(err.to_string(), root),
        })?;
        if !metadata.is_dir() {
            return Err(MdlSplitError::index_root_not_directory(root));
        }

        debug!("Indexing asset root {}", root.display());
        let mut entries = BTreeMap::new();
        let mut collisions = 0usize;

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || entry
                        .path()
                        .strip_prefix(root)
                        .map(|rel| keep(rel))
                        .unwrap_or(true)
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(MdlSplitError::index_root_unreadable(err.to_string(), root));
                }
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let logical = LogicalPath::from_relative(relative);
            if logical.is_empty() {
                continue;
            }

            match entries.entry(logical) {
                Entry::Vacant(slot) => {
                    trace!("Indexed {}", slot.key());
                    slot.insert(IndexEntry {
                        real_path: entry.path().to_path_buf(),
                        relative_path: relative.to_path_buf(),
                    });
                }
                Entry::Occupied(existing) => {
                    collisions += 1;
                    debug!(
                        "{} collides with {}, keeping the first",
                        relative.display(),
                        existing.get().relative_path.display()
                    );
                }
            }
        }

        debug!(
            "Indexed {} files ({} collisions)",
            entries.len(),
            collisions
        );
        Ok(PathIndex {
            root: root.to_path_buf(),
            entries,
            collisions,
        })
    }

    pub fn lookup(&self, path: &LogicalPath) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Normalizes `raw` before looking it up.
    pub fn lookup_str(&self, raw: &str) -> Option<&IndexEntry> {
        self.lookup(&LogicalPath::new(raw))
    }

    pub fn contains(&self, path: &LogicalPath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files dropped because an earlier file had the same logical path.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// All entries, ordered by logical path.
    pub fn iter(&self) -> impl Iterator<Item = (&LogicalPath, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn files_with_extension<'a>(
        &'a self,
        ext: &'a str,
    ) -> impl Iterator<Item = (&'a LogicalPath, &'a IndexEntry)> + 'a {
        self.entries
            .iter()
            .filter(move |(path, _)| path.has_extension(ext))
    }
}
