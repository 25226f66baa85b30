//! Process command - show what a single file would be renamed to.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use renpdf_core::extraction::rules::format_cpf;
use renpdf_core::naming::DocumentFields;
use renpdf_core::{
    CaseDispatcher, DocumentCategory, ExtractedField, PdfTextSource, RenameOutcome, TextSource,
};

use super::{load_config, Mode};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Document category
    #[arg(short, long, value_enum)]
    mode: Mode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Folder whose existing files are taken into account for collisions
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also print the extracted document text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct ProcessReport<'a> {
    fields: &'a DocumentFields,
    #[serde(flatten)]
    outcome: &'a RenameOutcome,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let category = DocumentCategory::from(args.mode);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let source = PdfTextSource::new(config.pdf.clone());
    let text = source.document_text(&args.input)?;

    let original_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let dispatcher = CaseDispatcher::new(&config.extraction);
    let fields = dispatcher.extract_fields(category, &text);
    let outcome = match &args.output_dir {
        Some(dir) => dispatcher.rename_text(category, &original_name, &text, dir.as_path()),
        None => dispatcher.rename_text(category, &original_name, &text, &HashSet::<String>::new()),
    };

    match args.format {
        OutputFormat::Json => {
            let report = ProcessReport {
                fields: &fields,
                outcome: &outcome,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print!("{}", format_text(&fields, &outcome)),
    }

    if args.show_text {
        println!();
        println!("{}", style("Extracted text:").dim());
        println!("{}", text);
    }

    Ok(())
}

fn format_text(fields: &DocumentFields, outcome: &RenameOutcome) -> String {
    let mut output = String::new();

    output.push_str(&format!("File:     {}\n", outcome.original_name));
    output.push_str(&format!("Category: {}\n", fields.category));
    output.push('\n');

    if let Some(id) = &fields.taxpayer_id {
        let shown = id.value.as_deref().map(format_cpf);
        output.push_str(&format_field("CPF", shown.as_deref(), id));
    }
    if let Some(contract) = &fields.contract_number {
        output.push_str(&format_field("Contract", contract.value.as_deref(), contract));
    }
    if let Some(name) = &fields.name {
        output.push_str(&format_field("Name", name.value.as_deref(), name));
    }
    if let Some(office) = fields.office {
        output.push_str(&format!("  {:<9} {}\n", "Office", office));
    }
    output.push('\n');

    if outcome.is_ok() {
        output.push_str(&format!("New name: {}\n", outcome.new_name));
    }
    output.push_str(&format!("Status:   {}\n", outcome.status));

    output
}

fn format_field(label: &str, shown: Option<&str>, field: &ExtractedField<String>) -> String {
    format!("  {:<9} {} [{}]\n", label, shown.unwrap_or("-"), field.status)
}
