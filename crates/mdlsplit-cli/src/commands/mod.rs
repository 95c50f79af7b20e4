pub mod deps;
pub mod export;
pub mod list;

// Re-export command functions for main.rs
pub use deps::cmd_deps;
pub use export::cmd_export;
pub use list::cmd_list;

use mdlsplit_error::MdlSplitError;
use mdlsplit_tracer::{LogicalPath, PathIndex, list_models};

/// Resolve a model argument: either its number in `list` output or a
/// path relative to the asset root.
pub fn resolve_model_arg(index: &PathIndex, arg: &str) -> Result<LogicalPath, MdlSplitError> {
    let models = list_models(index);
    if let Ok(number) = arg.trim().parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| models.get(i))
            .cloned()
            .ok_or_else(|| {
                MdlSplitError::cli_invalid_arguments(format!(
                    "Model number {number} is out of range (1-{})",
                    models.len()
                ))
            });
    }

    let path = LogicalPath::new(arg);
    if index.contains(&path) {
        return Ok(path);
    }
    // `list` shows models without their `models/` prefix
    let prefixed = path.clone().ensure_prefix("models");
    if index.contains(&prefixed) {
        return Ok(prefixed);
    }
    Err(MdlSplitError::tracer_model_not_found(path.as_str()))
}
