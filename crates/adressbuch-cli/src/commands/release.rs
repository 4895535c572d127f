//! Release command - validate reviewed sheets and build the release
//! files (Personen.csv, Firmen.csv, unknown-address report).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use adressbuch_core::{EntryRecord, ReferenceCatalog, SourcePos, Validator};

/// Arguments for the release command.
#[derive(Args)]
pub struct ReleaseArgs {
    /// Directory with the reviewed CSV sheets
    #[arg(default_value = "reviewed")]
    reviewed: PathBuf,

    /// Output directory for the release files
    #[arg(short, long, default_value = "release")]
    output: PathBuf,
}

pub fn run(args: ReleaseArgs, reference: &Path) -> anyhow::Result<()> {
    let catalog = ReferenceCatalog::load(reference)?;
    let mut validator = Validator::new(&catalog);

    let pattern = args.reviewed.join("*.csv");
    let mut files: Vec<PathBuf> =
        glob::glob(&pattern.to_string_lossy())?.collect::<Result<_, _>>()?;
    files.sort();
    if files.is_empty() {
        anyhow::bail!("no reviewed sheets in {}", args.reviewed.display());
    }

    let mut persons = Vec::new();
    let mut companies = Vec::new();
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("processing {name}");
        let mut reader = csv::Reader::from_path(file)?;
        for (i, row) in reader.deserialize::<EntryRecord>().enumerate() {
            let record = row?;
            // Line 1 is the header row.
            let pos = SourcePos::new(name.clone(), i as u64 + 2);
            validator.validate(&record, &pos);
            if record.is_company() {
                companies.push(validator.normalize_company(&record)?);
            } else {
                persons.push(validator.normalize_person(&record)?);
            }
        }
    }

    fs::create_dir_all(&args.output)?;
    write_csv(&args.output.join("Personen.csv"), &persons)?;
    write_csv(&args.output.join("Firmen.csv"), &companies)?;

    let unknown = args.output.join("Unklare Adressen vor 1882.csv");
    let tmp = unknown.with_extension("csv.tmp");
    {
        let mut out = BufWriter::new(File::create(&tmp)?);
        validator.report_unknown_addresses_before_1882(&mut out)?;
        out.flush()?;
    }
    fs::rename(&tmp, &unknown)?;

    validator.report(&mut std::io::stdout())?;
    println!(
        "{} {} persons and {} companies to {}",
        style("Wrote").green(),
        persons.len(),
        companies.len(),
        args.output.display()
    );
    Ok(())
}

/// Write rows to a CSV file via a temp file and rename, so a failed
/// run never leaves a truncated release file behind.
fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(&tmp)?));
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
