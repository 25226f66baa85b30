//! Run command - rename every PDF of a category folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::{glob_with, MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use renpdf_core::models::config::LogConfig;
use renpdf_core::{
    run_batch, BatchReport, CaseDispatcher, CopySink, DocumentCategory, PdfTextSource, RenameOutcome,
};

use super::{load_config, resolve_base_dir, Mode};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Document category to process
    #[arg(short, long, value_enum)]
    mode: Mode,

    /// Base folder holding the input and output trees
    #[arg(short, long, conflicts_with_all = ["input", "output"])]
    base_dir: Option<PathBuf>,

    /// Input folder (overrides the base folder layout)
    #[arg(short, long, requires = "output")]
    input: Option<PathBuf>,

    /// Output folder (overrides the base folder layout)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let category = DocumentCategory::from(args.mode);

    let (input_dir, output_dir) = match (args.input, args.output) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            let base = resolve_base_dir(args.base_dir, &config)?;
            (
                config.input_dir(&base, category.folder_name()),
                config.output_dir(&base, category.folder_name()),
            )
        }
    };

    if !input_dir.is_dir() {
        anyhow::bail!(
            "Input folder not found: {}. Run 'renpdf init' to create the folders.",
            input_dir.display()
        );
    }

    let delimiter = log_delimiter(&config.log)?;
    let files = list_pdfs(&input_dir)?;

    if files.is_empty() {
        println!(
            "{} Folder '{}' is empty. No PDFs to process.",
            style("⚠").yellow(),
            input_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} files to process ({})",
        style("ℹ").blue(),
        files.len(),
        category
    );

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let dispatcher = CaseDispatcher::new(&config.extraction);
    let source = PdfTextSource::new(config.pdf.clone());

    let report = run_batch(
        &dispatcher,
        category,
        &files,
        &source,
        &output_dir,
        &mut CopySink,
        |outcome| {
            pb.suspend(|| print_outcome(outcome));
            pb.inc(1);
        },
    );

    pb.finish_and_clear();

    let log_path = output_dir.join(format!(
        "{}_{}.csv",
        config.log.file_prefix,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    ));
    write_log(&log_path, delimiter, &report)?;
    info!("Run log written to {}", log_path.display());

    println!();
    println!(
        "{} Done. {} files renamed. Log saved to {}",
        style("✓").green(),
        report.renamed(),
        log_path.display()
    );
    if report.failed() > 0 {
        println!("   {} failed", style(report.failed()).red());
    }
    debug!("Run took {:?}", start.elapsed());

    Ok(())
}

/// `*.pdf` files directly under `dir`, any extension case, sorted by name.
fn list_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join("*.pdf");
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files: Vec<PathBuf> = glob_with(&pattern.to_string_lossy(), options)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    Ok(files)
}

fn log_delimiter(config: &LogConfig) -> anyhow::Result<u8> {
    u8::try_from(config.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow::anyhow!("Log delimiter must be an ASCII character: {:?}", config.delimiter))
}

fn print_outcome(outcome: &RenameOutcome) {
    if outcome.is_ok() {
        println!(
            "{} {} → {}",
            style("✔").green(),
            outcome.original_name,
            outcome.new_name
        );
    } else {
        println!(
            "{} {} → {}",
            style("✖").red(),
            outcome.original_name,
            outcome.status
        );
    }
}

fn write_log(path: &Path, delimiter: u8, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_path(path)?;

    wtr.write_record(["Original File", "New Name", "Status"])?;
    for outcome in &report.outcomes {
        let status = outcome.status.to_string();
        wtr.write_record([
            outcome.original_name.as_str(),
            outcome.new_name.as_str(),
            status.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_pdfs_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "c.txt", "d.pdf"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("e.pdf")).unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "d.pdf"]);
    }

    #[test]
    fn test_log_delimiter() {
        assert_eq!(log_delimiter(&LogConfig::default()).unwrap(), b';');

        let config = LogConfig {
            delimiter: 'º',
            ..LogConfig::default()
        };
        assert!(log_delimiter(&config).is_err());
    }
}
