//! # mdlsplit-tracer
//!
//! Dependency resolution for Source engine models.
//!
//! Given an extracted asset tree, this crate works out which files one
//! model needs: the `.mdl` itself, its sidecars (`.vvd`, `.phy`, `.vtx`, ...),
//! the materials named inside the model binary and every texture those
//! materials reach through `include` chains.
//!
//! ## Pieces
//!
//! - [`PathIndex`]: case-insensitive map of every file under the asset root
//! - [`ModelScanner`]: pulls material candidates out of model bytes
//! - [`MaterialParser`]: reads texture keys and includes from `.vmt` text
//! - [`MaterialResolver`]: follows includes with cycle protection
//! - [`DependencyCollector`]: ties the above together per model
//!
//! ## Example
//!
// Example usage (not a real test):
// use mdlsplit_tracer::{DependencyCollector, LogicalPath, PathIndex};
//
// let index = PathIndex::build("/path/to/addon")?;
// let mut collector = DependencyCollector::new(&index);
// let result = collector.collect(&LogicalPath::new("models/props/chair.mdl"))?;
// for file in &result.resolved_files {
//     println!("{} {}", file.role, file.relative_path.display());
// }
// Ok::<(), mdlsplit_error::MdlSplitError>(())
pub mod collect_result;
pub mod collector;
pub mod index;
pub mod lpath;
pub mod material;
pub mod options;
pub mod resolver;
pub mod scanner;

pub use collect_result::{FileRole, MissingRef, ResolutionResult, ResolvedFile};
pub use collector::{DependencyCollector, MODEL_EXTENSION, list_models};
pub use index::{IndexEntry, PathIndex};
pub use lpath::LogicalPath;
pub use material::{MaterialParser, MaterialRecord, ParsedMaterial};
pub use options::CollectorOptions;
pub use resolver::{MaterialCache, MaterialClosure, MaterialResolver};
pub use scanner::ModelScanner;

/// Canonical result type for this crate
pub use mdlsplit_error::Result;
