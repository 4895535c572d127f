//! CLI application for address-book digitization.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{release, split};

/// Historical Bern address books - split OCR lines into review
/// sheets, validate reviewed sheets, build the release files
#[derive(Parser)]
#[command(name = "adressbuch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory with the reference tables
    #[arg(short, long, global = true, default_value = "reference")]
    reference: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split raw OCR lines into a review sheet
    Split(split::SplitArgs),

    /// Validate reviewed sheets and build the release files
    Release(release::ReleaseArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; validation warnings are
    // emitted at WARN and always visible.
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Split(args) => split::run(args, &cli.reference),
        Commands::Release(args) => release::run(args, &cli.reference),
    }
}
