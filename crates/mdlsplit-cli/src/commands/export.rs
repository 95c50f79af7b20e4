use crate::exporter::{allocate_export_dir, export_model, next_export_number};
use crate::selection::parse_selection;
use crate::util::{colorize_index, colorize_path, colorize_warning, display_model, load_index};
use anyhow::bail;
use log::{error, info};
use mdlsplit_error::MdlSplitError;
use mdlsplit_tracer::{CollectorOptions, DependencyCollector, LogicalPath, list_models};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub fn cmd_export(
    root: PathBuf,
    select: Option<String>,
    out: Option<PathBuf>,
    options: CollectorOptions,
) -> anyhow::Result<()> {
    let index = load_index(&root)?;
    let models = list_models(&index);
    if models.is_empty() {
        bail!(
            "No .mdl files found under {}. Are you in the right folder?",
            root.display()
        );
    }

    let picks = match select {
        Some(spec) => parse_selection(&spec, models.len())?,
        None => {
            println!("Props found:");
            for (i, model) in models.iter().enumerate() {
                println!(
                    "{:>5}  {}",
                    colorize_index(i + 1),
                    display_model(&index, model)
                );
            }
            match prompt_selection(models.len())? {
                Some(picks) => picks,
                None => return Err(MdlSplitError::cli_cancelled().into()),
            }
        }
    };
    if picks.is_empty() {
        bail!("Nothing selected");
    }

    let parent = out.unwrap_or_else(|| root.clone());
    let mut next = next_export_number(&parent)?;
    let mut collector = DependencyCollector::with_options(&index, options)?;

    println!("\nExporting {} model(s)...", picks.len());
    let mut created = Vec::new();
    let mut failures = 0usize;
    for pick in picks {
        let model = &models[pick - 1];
        match export_one(&mut collector, model, &parent, &mut next) {
            Ok((dir, missing)) => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let mut line = format!(
                    "  {} -> {}",
                    display_model(&index, model),
                    colorize_path(&name)
                );
                if missing > 0 {
                    line.push_str(&colorize_warning(&format!("  ({missing} missing)")));
                }
                println!("{line}");
                created.push(name);
            }
            Err(err) => {
                failures += 1;
                println!(
                    "  {} -> {}",
                    display_model(&index, model),
                    colorize_warning(&err.summary())
                );
                error!("{}", err.user_message());
            }
        }
    }

    println!("\nDone. Created {} folder(s).", created.len());
    if failures > 0 {
        println!("{}", colorize_warning(&format!("{failures} export(s) failed")));
        if created.is_empty() {
            bail!("All {failures} selected export(s) failed");
        }
    }
    Ok(())
}

fn export_one(
    collector: &mut DependencyCollector<'_>,
    model: &LogicalPath,
    parent: &Path,
    next: &mut u64,
) -> Result<(PathBuf, usize), MdlSplitError> {
    let result = collector.collect(model)?;
    let dir = allocate_export_dir(parent, next)?;
    info!("Exporting {model} into {}", dir.display());
    let report = export_model(&result, &dir)?;
    Ok((report.dir, report.manifest.missing.len()))
}

/// Ask on stdin until the answer parses to a non-empty selection.
/// `None` when stdin closes first.
fn prompt_selection(count: usize) -> Result<Option<Vec<usize>>, MdlSplitError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("\nEnter indices (e.g. 1,5-7,12) or 'all': ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_selection(line, count) {
            Ok(picks) if picks.is_empty() => println!("[!] Nothing selected"),
            Ok(picks) => return Ok(Some(picks)),
            Err(err) => println!("[!] {err}"),
        }
    }
}
