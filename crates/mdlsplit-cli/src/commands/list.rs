use crate::util::{colorize_index, display_model, load_index};
use mdlsplit_tracer::list_models;
use std::path::PathBuf;

pub fn cmd_list(root: PathBuf) -> anyhow::Result<()> {
    let index = load_index(&root)?;
    let models = list_models(&index);
    if models.is_empty() {
        println!("No .mdl files found under {}", root.display());
        return Ok(());
    }

    println!("Props found:");
    for (i, model) in models.iter().enumerate() {
        println!(
            "{:>5}  {}",
            colorize_index(i + 1),
            display_model(&index, model)
        );
    }
    println!("Total: {}", models.len());
    Ok(())
}
