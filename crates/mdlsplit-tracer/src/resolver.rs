//! Material include-chain resolution.

use crate::collect_result::{FileRole, MissingRef, ResolvedFile};
use crate::index::{IndexEntry, PathIndex};
use crate::lpath::LogicalPath;
use crate::material::{MaterialParser, MaterialRecord};
use log::{debug, trace, warn};
use mdlsplit_error::{MdlSplitError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fs;
use std::rc::Rc;

/// Parsed materials shared between models of one run.
///
/// Materials are read at most once per run; content is assumed not to
/// change while the run is in progress.
#[derive(Debug, Default)]
pub struct MaterialCache {
    records: HashMap<LogicalPath, Rc<MaterialRecord>>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &LogicalPath) -> Option<Rc<MaterialRecord>> {
        self.records.get(path).cloned()
    }

    /// Return the cached record for `path`, reading and parsing it on first use.
    /// Read failures are not cached.
    pub fn get_or_parse(
        &mut self,
        path: &LogicalPath,
        entry: &IndexEntry,
        parser: &MaterialParser,
    ) -> Result<Rc<MaterialRecord>> {
        if let Some(record) = self.records.get(path) {
            trace!("Material cache hit for {path}");
            return Ok(Rc::clone(record));
        }
        let content = fs::read(&entry.real_path).map_err(|err| {
            MdlSplitError::tracer_material_unreadable(err.to_string(), &entry.real_path)
        })?;
        let record = Rc::new(MaterialRecord::new(path.clone(), parser.parse(&content)));
        trace!(
            "Parsed {path}: {} textures, {} includes",
            record.textures.len(),
            record.includes.len()
        );
        self.records.insert(path.clone(), Rc::clone(&record));
        Ok(record)
    }
}

/// Materials, textures and missing references reachable from one material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialClosure {
    pub materials: BTreeMap<LogicalPath, ResolvedFile>,
    pub textures: BTreeMap<LogicalPath, ResolvedFile>,
    pub missing: BTreeSet<MissingRef>,
}

impl MaterialClosure {
    pub fn has_material(&self, path: &str) -> bool {
        self.materials.contains_key(&LogicalPath::new(path))
    }

    pub fn has_texture(&self, path: &str) -> bool {
        self.textures.contains_key(&LogicalPath::new(path))
    }
}

/// Follows include directives breadth-first, collecting every texture on the way.
pub struct MaterialResolver<'a> {
    index: &'a PathIndex,
    parser: &'a MaterialParser,
    cache: &'a mut MaterialCache,
    material_root: String,
}

impl<'a> MaterialResolver<'a> {
    pub fn new(
        index: &'a PathIndex,
        parser: &'a MaterialParser,
        cache: &'a mut MaterialCache,
        material_root: &str,
    ) -> Self {
        Self {
            index,
            parser,
            cache,
            material_root: material_root.to_string(),
        }
    }

    /// Find a material, retrying once with a doubled `materials/materials/`
    /// prefix collapsed. Returns the logical path that actually matched.
    pub fn lookup_material(&self, path: &LogicalPath) -> Option<(LogicalPath, &'a IndexEntry)> {
        let index = self.index;
        if let Some(entry) = index.lookup(path) {
            return Some((path.clone(), entry));
        }
        let doubled = format!("{0}/{0}/", self.material_root);
        if path.as_str().starts_with(&doubled) {
            let collapsed = LogicalPath::new(&path.as_str()[self.material_root.len() + 1..]);
            if let Some(entry) = index.lookup(&collapsed) {
                return Some((collapsed, entry));
            }
        }
        None
    }

    /// Resolve `root` and everything it includes.
    ///
    /// `referenced_by` is recorded as the referrer if `root` itself is missing.
    /// Each material is processed once, so include cycles terminate.
    pub fn resolve(&mut self, root: &LogicalPath, referenced_by: &LogicalPath) -> MaterialClosure {
        let mut closure = MaterialClosure::default();
        let mut visited: HashSet<LogicalPath> = HashSet::new();
        let mut queue = VecDeque::from([(root.clone(), referenced_by.clone())]);

        while let Some((material, parent)) = queue.pop_front() {
            if !visited.insert(material.clone()) {
                continue;
            }
            let Some((resolved, entry)) = self.lookup_material(&material) else {
                debug!("Material {material} (from {parent}) is not in the index");
                closure.missing.insert(MissingRef::new(material, parent));
                continue;
            };
            if resolved != material && !visited.insert(resolved.clone()) {
                continue;
            }

            let record = match self.cache.get_or_parse(&resolved, entry, self.parser) {
                Ok(record) => record,
                Err(err) => {
                    warn!("{}", err.user_message());
                    closure.missing.insert(MissingRef::new(material, parent));
                    continue;
                }
            };
            closure.materials.insert(
                resolved.clone(),
                ResolvedFile::new(resolved.clone(), entry, FileRole::Material),
            );

            for texture in &record.textures {
                match self.index.lookup(texture) {
                    Some(entry) => {
                        closure.textures.insert(
                            texture.clone(),
                            ResolvedFile::new(texture.clone(), entry, FileRole::Texture),
                        );
                    }
                    None => {
                        debug!("Texture {texture} (from {resolved}) is not in the index");
                        closure
                            .missing
                            .insert(MissingRef::new(texture.clone(), resolved.clone()));
                    }
                }
            }
            for include in &record.includes {
                if !visited.contains(include) {
                    queue.push_back((include.clone(), resolved.clone()));
                }
            }
        }

        trace!(
            "Resolved {root}: {} materials, {} textures, {} missing",
            closure.materials.len(),
            closure.textures.len(),
            closure.missing.len()
        );
        closure
    }
}
