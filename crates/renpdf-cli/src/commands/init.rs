//! Init command - create the folder layout.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use renpdf_core::DocumentCategory;

use super::{load_config, resolve_base_dir};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Base folder (default: configured base folder, else next to the executable)
    #[arg(short, long)]
    base_dir: Option<PathBuf>,
}

pub fn run(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let base = resolve_base_dir(args.base_dir, &config)?;

    for category in DocumentCategory::ALL {
        for dir in [
            config.input_dir(&base, category.folder_name()),
            config.output_dir(&base, category.folder_name()),
        ] {
            fs::create_dir_all(&dir)?;
            debug!("Ensured {}", dir.display());
        }
    }

    println!(
        "{} Folders ready under {}",
        style("✓").green(),
        base.display()
    );
    println!(
        "   Put PDFs in {}/<category>, results land in {}/<category>",
        config.paths.input_dir, config.paths.output_dir
    );

    Ok(())
}
