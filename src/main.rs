//! Draft Binders - MTGO draft rentals & trade binders
//!
//! Walks a draft through its steps: set up the draft directory, find the
//! cards to rent, and write trade binders once the rental has arrived.

use clap::{Parser, Subcommand};
use draft_binders::draft_list::{read_card_list, write_card_list};
use draft_binders::ownership::{
    estimate_samples, format_ownership_report, ownership_stats, DEFAULT_SAMPLES,
    DEFAULT_THRESHOLD,
};
use draft_binders::{owned_csv, read_dek_file, workflow, DraftConfig, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// MTGO draft helper - rentals and trade binders from .dek collections
#[derive(Parser, Debug)]
#[command(name = "draft_binders")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON configuration file (default: <config dir>/draft_binders/config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding owned.dek and the drafts folder
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Folder exported deck lists and rented .dek files are downloaded to
    #[arg(long, global = true)]
    downloads: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the directory for a new draft
    Setup { name: String },

    /// Import exported deck lists and write rentals.txt
    Rentals {
        name: String,

        /// Do not copy exports from the downloads folder first
        #[arg(long, default_value_t = false)]
        no_import: bool,
    },

    /// Write a trade binder for every deck list of a draft
    TradeBinders {
        name: String,

        /// Rented .dek file (default: newest .dek in the downloads folder)
        #[arg(long)]
        rented: Option<PathBuf>,
    },

    /// Ownership stats and rental odds for a card list
    Stats {
        /// Text file with one card name per line
        cards: PathBuf,

        /// Owned .dek file (default: owned.dek in the base directory)
        #[arg(long)]
        owned: Option<PathBuf>,

        /// Treat the card list as a set of unique names
        #[arg(long, default_value_t = false)]
        unique: bool,

        /// Threshold for "more than" non-owned cards
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u64,

        /// Sample sizes to evaluate
        #[arg(long, num_args = 1.., default_values_t = DEFAULT_SAMPLES)]
        samples: Vec<u64>,

        /// Write the missing card names here, one per line
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },

    /// Convert a collection CSV export (name, itemID) into a .dek file
    OwnedFromCsv { csv: PathBuf },

    /// Run a whole draft interactively
    Run { name: String },
}

fn main() {
    // Initialize logging. Set RUST_LOG to control the level, e.g. RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = DraftConfig::load_or_default(args.config.as_deref())?;
    if let Some(base_dir) = args.base_dir {
        config.base_dir = base_dir;
    }
    if let Some(downloads) = args.downloads {
        config.downloads_dir = downloads;
    }
    log::debug!("Configuration: {config:?}");

    match args.command {
        Command::Setup { name } => {
            workflow::setup_draft(&config, &name)?;
        }
        Command::Rentals { name, no_import } => rentals(&config, &name, !no_import)?,
        Command::TradeBinders { name, rented } => {
            trade_binders(&config, &name, rented.as_deref())?
        }
        Command::Stats {
            cards,
            owned,
            unique,
            threshold,
            samples,
            output_file,
        } => {
            let owned = owned.unwrap_or_else(|| config.owned_path());
            stats(&cards, &owned, unique, threshold, &samples, output_file.as_deref())?;
        }
        Command::OwnedFromCsv { csv } => {
            let (binder, path) = owned_csv::convert_csv_to_dek(&csv)?;
            println!("Wrote {} cards to {}", binder.len(), path.display());
        }
        Command::Run { name } => run_draft(&config, &name)?,
    }
    Ok(())
}

fn rentals(config: &DraftConfig, name: &str, import: bool) -> Result<()> {
    if import {
        workflow::import_draft_exports(config, name)?;
    }
    let report = workflow::find_rentals(config, name)?.value;

    println!("DRAFTED ({})", report.drafted.len());
    println!("RENTALS ({}):", report.rentals.len());
    for card in &report.rentals {
        println!("  {card}");
    }
    println!("Wrote {}", report.rentals_path.display());
    Ok(())
}

fn trade_binders(config: &DraftConfig, name: &str, rented: Option<&Path>) -> Result<()> {
    let outcome = workflow::create_trade_binders(config, name, rented)?;

    for (path, binder) in &outcome.value.binders {
        println!("{} ({} cards)", path.display(), binder.len());
    }
    let unmatched = draft_binders::binder::unmatched_cards(&outcome.diagnostics);
    if !unmatched.is_empty() {
        println!("Not found in owned or rented cards: {}", unmatched.join(", "));
    }
    Ok(())
}

fn stats(
    cards: &Path,
    owned: &Path,
    unique: bool,
    threshold: u64,
    samples: &[u64],
    output_file: Option<&Path>,
) -> Result<()> {
    let cards = read_card_list(cards)?;
    let owned = read_dek_file(owned)?.value;

    let stats = ownership_stats(&cards, &owned, unique)?;
    let estimates = estimate_samples(&stats, samples, threshold);
    print!(
        "{}",
        format_ownership_report(&stats, &estimates.value, &estimates.diagnostics, threshold)
    );

    if let Some(path) = output_file {
        let missing: Vec<&String> = stats.missing.iter().collect();
        write_card_list(path, &missing)?;
        println!("Wrote {} names to {}", missing.len(), path.display());
    }
    Ok(())
}

fn run_draft(config: &DraftConfig, name: &str) -> Result<()> {
    match workflow::setup_draft(config, name) {
        Ok(dir) => println!("Directory created at: {}", dir.display()),
        Err(draft_binders::DraftError::DraftExists { path }) => {
            println!("Directory already exists: {}", path.display())
        }
        Err(e) => return Err(e),
    }

    println!(
        "Once you have finished drafting, export the draft decks as card names to {}.",
        config.downloads_dir.display()
    );
    wait_for_enter("Press Enter to generate rentals...");
    rentals(config, name, true)?;

    println!(
        "Upload rentals.txt to the rental service. Once the cards arrive, download the rented .dek file to {}.",
        config.downloads_dir.display()
    );
    wait_for_enter("Press Enter to generate trade binders...");
    trade_binders(config, name, None)?;

    println!("Import the trade binders on MTGO and open trades with the other drafters.");
    Ok(())
}

fn wait_for_enter(prompt: &str) {
    println!("{prompt}");
    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        log::warn!("Failed to read from stdin: {e}");
    }
}
