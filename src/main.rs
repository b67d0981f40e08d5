//! arena-extract - card art extraction CLI

use arena_extract::export::{export_cards, ExportOptions, UnityArtSource};
use arena_extract::loader::{CardDatabase, InstallPaths};
use arena_extract::select::CardFilter;
use arena_extract::Result;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Extracts card art from a local MTG Arena installation.
#[derive(Parser, Debug)]
#[command(name = "arena-extract", version)]
#[command(about = "Extracts card metadata and art from MTGA", long_about = None)]
struct Cli {
    /// Regex matched case-insensitively against the start of card names.
    /// Omit it (together with --set) to only rebuild the card database.
    card_re: Option<String>,

    /// Three-letter set code to filter for
    #[arg(long)]
    set: Option<String>,

    /// Path of the cached card database
    #[arg(long, default_value = "card_data.json")]
    db: PathBuf,

    /// Output directory
    #[arg(long, default_value = "out")]
    output: PathBuf,

    /// Path to the MTGA install directory
    #[arg(long, default_value = r"C:\Program Files\Wizards of the Coast\MTGA")]
    mtga: PathBuf,

    /// Localization language to search card names in
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Resize exported images to --width x --height
    #[arg(long)]
    resize: bool,

    /// Output image width
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Output image height
    #[arg(long, default_value_t = 376)]
    height: u32,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let filter = CardFilter::new(cli.card_re.as_deref(), cli.set.clone())?;
    let paths = InstallPaths::new(&cli.mtga);

    // No selectors means refresh-only: drop the cache and rebuild it.
    let db = CardDatabase::load_or_build(&paths, &cli.db, &cli.lang, filter.is_empty())?;
    info!("card database holds {} records", db.len());

    if filter.is_empty() {
        return Ok(());
    }

    let opts = ExportOptions {
        out_dir: cli.output.clone(),
        resize: cli.resize,
        width: cli.width,
        height: cli.height,
    };
    let report = export_cards(filter.select(&db), &paths.asset_dir, &UnityArtSource, &opts);
    info!(
        "exported {} images ({} already present, {} without art, {} failed)",
        report.written, report.skipped, report.missing_art, report.failed
    );
    Ok(())
}
