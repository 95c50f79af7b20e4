use crate::commands::resolve_model_arg;
use crate::util::{colorize_path, colorize_role, colorize_warning, load_index, slash_path};
use mdlsplit_error::MdlSplitError;
use mdlsplit_tracer::{CollectorOptions, DependencyCollector, FileRole, ResolutionResult};
use std::path::PathBuf;
use text_trees::{FormatCharacters, StringTreeNode, TreeFormatting};

pub fn cmd_deps(
    root: PathBuf,
    model: String,
    format: crate::OutputFormat,
    ascii: bool,
    options: CollectorOptions,
) -> anyhow::Result<()> {
    let index = load_index(&root)?;
    let model = resolve_model_arg(&index, &model)?;
    let mut collector = DependencyCollector::with_options(&index, options)?;
    let result = collector.collect(&model)?;

    match format {
        crate::OutputFormat::Flat => {
            println!("Dependencies for {}:", colorize_path(model.as_str()));
            for file in &result.resolved_files {
                println!(
                    "  {:<9} {}",
                    colorize_role(&file.role.to_string()),
                    slash_path(&file.relative_path)
                );
            }
            print_missing(&result);
        }
        crate::OutputFormat::Tree => {
            println!("Dependency tree for {}:", colorize_path(model.as_str()));
            let format_chars = if ascii {
                FormatCharacters::ascii()
            } else {
                FormatCharacters::box_chars()
            };
            let formatting = TreeFormatting::dir_tree(format_chars);
            let output = build_text_tree(&result)
                .to_string_with_format(&formatting)
                .map_err(|e| {
                    MdlSplitError::cli_output_format_failed(format!("cannot render tree: {e}"))
                })?;
            println!("{output}");
            println!("Summary:");
            println!("  Files: {}", result.resolved_files.len());
            println!("  Missing: {}", result.missing_refs.len());
        }
        crate::OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).map_err(|e| {
                MdlSplitError::cli_output_format_failed(format!("cannot serialize to JSON: {e}"))
            })?;
            println!("{json}");
        }
    }
    Ok(())
}

fn print_missing(result: &ResolutionResult) {
    if result.is_complete() {
        return;
    }
    println!(
        "{}",
        colorize_warning(&format!("Missing ({}):", result.missing_refs.len()))
    );
    for missing in &result.missing_refs {
        println!(
            "  {}  (referenced by {})",
            missing.logical_path, missing.referenced_by
        );
    }
}

/// Model at the root, one branch per file role, missing references last.
pub fn build_text_tree(result: &ResolutionResult) -> StringTreeNode {
    let mut groups = Vec::new();
    for (role, label) in [
        (FileRole::Sidecar, "sidecars"),
        (FileRole::Material, "materials"),
        (FileRole::Texture, "textures"),
    ] {
        let leaves: Vec<StringTreeNode> = result
            .files_with_role(role)
            .map(|file| StringTreeNode::new(slash_path(&file.relative_path)))
            .collect();
        if !leaves.is_empty() {
            groups.push(StringTreeNode::with_child_nodes(
                format!("{label} ({})", leaves.len()),
                leaves.into_iter(),
            ));
        }
    }
    if !result.missing_refs.is_empty() {
        let leaves = result.missing_refs.iter().map(|missing| {
            StringTreeNode::new(format!(
                "{} <- {}",
                missing.logical_path, missing.referenced_by
            ))
        });
        groups.push(StringTreeNode::with_child_nodes(
            format!("missing ({})", result.missing_refs.len()),
            leaves,
        ));
    }

    let root_label = result
        .files_with_role(FileRole::Model)
        .next()
        .map(|file| slash_path(&file.relative_path))
        .unwrap_or_else(|| result.model.to_string());
    StringTreeNode::with_child_nodes(root_label, groups.into_iter())
}
