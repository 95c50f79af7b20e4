use crate::collect_result::{FileRole, MissingRef, ResolutionResult, ResolvedFile};
use crate::index::PathIndex;
use crate::lpath::LogicalPath;
use crate::material::MaterialParser;
use crate::options::CollectorOptions;
use crate::resolver::{MaterialCache, MaterialResolver};
use crate::scanner::ModelScanner;
use log::{debug, trace, warn};
use mdlsplit_error::{MdlSplitError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// Model file extension.
pub const MODEL_EXTENSION: &str = "mdl";

/// Every model in the index: paths under `models/` first, then the rest,
/// each group alphabetical.
pub fn list_models(index: &PathIndex) -> Vec<LogicalPath> {
    let mut models: Vec<LogicalPath> = index
        .files_with_extension(MODEL_EXTENSION)
        .map(|(path, _)| path.clone())
        .collect();
    models.sort_by_key(|path| (!path.starts_with_dir("models"), path.clone()));
    models
}

/// Builds the file closure of one model at a time.
///
/// The collector borrows the run's [`PathIndex`] and owns the material parse
/// cache, so materials shared between models are only read once. Nothing
/// else carries over from one [`collect`](Self::collect) call to the next.
pub struct DependencyCollector<'a> {
    index: &'a PathIndex,
    options: CollectorOptions,
    parser: MaterialParser,
    scanner: ModelScanner,
    cache: MaterialCache,
}

impl<'a> DependencyCollector<'a> {
    pub fn new(index: &'a PathIndex) -> Self {
        Self::from_validated(index, CollectorOptions::default())
    }

    /// Build a collector with custom options. The options are passed through
    /// [`CollectorOptions::validate`] first, so `.VMT`-style extensions and
    /// `$`-prefixed keys are accepted.
    pub fn with_options(index: &'a PathIndex, options: CollectorOptions) -> Result<Self> {
        Ok(Self::from_validated(index, options.validate()?))
    }

    fn from_validated(index: &'a PathIndex, options: CollectorOptions) -> Self {
        DependencyCollector {
            index,
            parser: MaterialParser::new(&options),
            scanner: ModelScanner::new(&options),
            options,
            cache: MaterialCache::new(),
        }
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    pub fn index(&self) -> &'a PathIndex {
        self.index
    }

    pub fn cache(&self) -> &MaterialCache {
        &self.cache
    }

    /// Resolve `model` and everything it depends on.
    ///
    /// Fails only when the model itself is not indexed. Missing sidecars are
    /// skipped, scanner candidates that name no file are discarded, and
    /// references from parsed materials that do not resolve end up in
    /// `missing_refs`.
    pub fn collect(&mut self, model: &LogicalPath) -> Result<ResolutionResult> {
        debug!("Collecting dependencies for {model}");
        let index = self.index;
        let entry = index
            .lookup(model)
            .ok_or_else(|| MdlSplitError::tracer_model_not_found(model.as_str()))?;

        let mut files: BTreeMap<LogicalPath, ResolvedFile> = BTreeMap::new();
        let mut missing: BTreeSet<MissingRef> = BTreeSet::new();
        files.insert(
            model.clone(),
            ResolvedFile::new(model.clone(), entry, FileRole::Model),
        );

        let mut scan_sources = vec![entry];
        let base = model.without_extension();
        for ext in &self.options.sidecar_extensions {
            let sidecar = LogicalPath::new(format!("{base}{ext}"));
            if sidecar == *model || files.contains_key(&sidecar) {
                continue;
            }
            if let Some(sidecar_entry) = index.lookup(&sidecar) {
                trace!("Sidecar {sidecar}");
                files.insert(
                    sidecar.clone(),
                    ResolvedFile::new(sidecar, sidecar_entry, FileRole::Sidecar),
                );
                if self.options.scan_sidecars {
                    scan_sources.push(sidecar_entry);
                }
            }
        }

        let mut candidates = BTreeSet::new();
        for source in scan_sources {
            match fs::read(&source.real_path) {
                Ok(bytes) => candidates.extend(self.scanner.scan(&bytes)),
                Err(err) => warn!(
                    "{}",
                    MdlSplitError::tracer_model_unreadable(err.to_string(), &source.real_path)
                        .with_model(model.as_str())
                        .user_message()
                ),
            }
        }
        if self.options.name_hints {
            candidates.extend(self.name_hint_candidates(model));
        }
        debug!("{} material candidates for {model}", candidates.len());

        let mut resolver = MaterialResolver::new(
            index,
            &self.parser,
            &mut self.cache,
            &self.options.material_root,
        );
        for candidate in &candidates {
            if resolver.lookup_material(candidate).is_none() {
                trace!("Discarding candidate {candidate}");
                continue;
            }
            let closure = resolver.resolve(candidate, model);
            for (path, file) in closure.materials.into_iter().chain(closure.textures) {
                files.entry(path).or_insert(file);
            }
            missing.extend(closure.missing);
        }

        let result = ResolutionResult::new(model.clone(), files, missing);
        debug!(
            "{model}: {} files, {} missing references",
            result.resolved_files.len(),
            result.missing_refs.len()
        );
        Ok(result)
    }

    /// `materials/<model dir>/<stem>.vmt` plus any indexed material whose
    /// stem contains the model stem and whose path contains the model dir.
    fn name_hint_candidates(&self, model: &LogicalPath) -> Vec<LogicalPath> {
        let Some(dir) = model.parent() else {
            return Vec::new();
        };
        let stem = model.file_stem();
        let ext = &self.options.material_extension;

        let mut hints = vec![LogicalPath::new(format!(
            "{}/{dir}/{stem}.{ext}",
            self.options.material_root
        ))];
        hints.extend(
            self.index
                .files_with_extension(ext)
                .filter(|(path, _)| path.file_stem().contains(stem) && path.as_str().contains(dir))
                .map(|(path, _)| path.clone()),
        );
        hints
    }
}
