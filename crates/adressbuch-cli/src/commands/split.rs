//! Split command - segment raw OCR lines into a review sheet.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use adressbuch_core::{read_ocr_lines, EntryRecord, ReferenceCatalog, SourcePos, Splitter, Validator};

/// Arguments for the split command.
#[derive(Args)]
pub struct SplitArgs {
    /// Input CSV with OCR lines (PageID, Column, X, Y, Width, Height, Text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Keep only entries with unresolved text, for triage
    #[arg(long)]
    unrecognized_only: bool,

    /// Cross-check the split entries against the reference tables
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Review-sheet CSV
    Csv,
    /// JSON records
    Json,
}

pub fn run(args: SplitArgs, reference: &Path) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }
    let catalog = ReferenceCatalog::load(reference)?;
    let lines = read_ocr_lines(&args.input)?;
    info!("read {} OCR lines from {}", lines.len(), args.input.display());

    let splitter = Splitter::new(&catalog);
    let entries = splitter.split(&lines);
    info!("split into {} entries", entries.len());

    let mut records: Vec<EntryRecord> = entries.iter().map(|e| e.to_record()).collect();
    if args.unrecognized_only {
        records.retain(|r| !r.unrecognized.is_empty());
    }

    if args.validate {
        let mut validator = Validator::new(&catalog);
        let file = args.input.display().to_string();
        for (i, record) in records.iter().enumerate() {
            // Line 1 is the header row.
            let pos = SourcePos::new(file.clone(), i as u64 + 2);
            validator.validate(record, &pos);
        }
        validator.report(&mut std::io::stderr())?;
    }

    let output = match args.format {
        OutputFormat::Csv => to_csv(&records)?,
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
    };
    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            println!("Wrote {} entries to {}", records.len(), path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}

fn to_csv(records: &[EntryRecord]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}
