// Utility functions for CLI

use crate::exporter::is_export_dir_name;
use mdlsplit_error::MdlSplitError;
use mdlsplit_tracer::{CollectorOptions, LogicalPath, PathIndex};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Component, Path};

/// Load collector options from an optional TOML file, then apply flag
/// overrides on top.
pub fn load_options(
    config: Option<&Path>,
    name_hints: bool,
    scan_sidecars: bool,
    min_token_len: Option<usize>,
) -> Result<CollectorOptions, MdlSplitError> {
    let mut options = match config {
        Some(path) => {
            let text =
                fs::read_to_string(path).map_err(|_| MdlSplitError::config_not_found(path))?;
            toml::from_str::<CollectorOptions>(&text)
                .map_err(|err| MdlSplitError::config_invalid_format(err.to_string(), path))?
        }
        None => CollectorOptions::default(),
    };
    options.name_hints |= name_hints;
    options.scan_sidecars |= scan_sidecars;
    if let Some(len) = min_token_len {
        options.min_token_len = len;
    }
    options.validate()
}

/// Index the asset root, leaving out earlier `EXPORTED<n>` folders so
/// exports never feed back into later runs.
pub fn load_index(root: &Path) -> Result<PathIndex, MdlSplitError> {
    let index = PathIndex::build_filtered(root, |rel| {
        let mut components = rel.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => !name.to_str().is_some_and(is_export_dir_name),
            _ => true,
        }
    })?;

    let looks_like_addon = index
        .iter()
        .any(|(path, _)| path.starts_with_dir("models") || path.starts_with_dir("materials"));
    if !looks_like_addon {
        return Err(MdlSplitError::cli_invalid_arguments(format!(
            "'{}' has no models/ or materials/ folder. Run this from the extracted addon root.",
            root.display()
        )));
    }
    Ok(index)
}

/// Forward-slash rendering of a relative path.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// On-disk spelling of an indexed path, falling back to the logical path.
pub fn disk_path(index: &PathIndex, path: &LogicalPath) -> String {
    index
        .lookup(path)
        .map(|entry| slash_path(&entry.relative_path))
        .unwrap_or_else(|| path.to_string())
}

/// Model name as shown in listings: on-disk spelling without `models/`.
pub fn display_model(index: &PathIndex, model: &LogicalPath) -> String {
    let shown = disk_path(index, model);
    match shown.split_once('/') {
        Some((first, rest)) if first.eq_ignore_ascii_case("models") => rest.to_string(),
        _ => shown,
    }
}

// Colorization helpers
pub fn should_use_colors() -> bool {
    isatty::stdout_isatty()
}

pub fn colorize_index(index: usize) -> String {
    if should_use_colors() {
        index.to_string().green().to_string()
    } else {
        index.to_string()
    }
}

pub fn colorize_path(path: &str) -> String {
    if should_use_colors() {
        path.yellow().to_string()
    } else {
        path.to_string()
    }
}

pub fn colorize_role(role: &str) -> String {
    if should_use_colors() {
        role.blue().to_string()
    } else {
        role.to_string()
    }
}

pub fn colorize_warning(text: &str) -> String {
    if should_use_colors() {
        text.red().to_string()
    } else {
        text.to_string()
    }
}
