mod commands;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use coin_calc::{CoinIndex, LetterValues, ParseMode, Wallet, WordFinder};
use commands::{Args, Parser};

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of info (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Read the wallet
    let mode = if args.skip_invalid {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    log::info!("Reading wallet from {}", args.wallet_file.display());
    let file = File::open(&args.wallet_file)
        .with_context(|| format!("Failed to open wallet file: {}", args.wallet_file.display()))?;
    let wallet = Wallet::read(file, mode).context("Failed to read wallet")?;

    // 2. Check it against the coin value index, if one was given
    let index = args.values.as_deref().map(read_index).transpose()?;
    if let Some(index) = &index {
        index
            .validate(&wallet)
            .context("Wallet does not match the coin value index")?;
    }

    // 3. Print the report to stdout
    wallet
        .write_report(std::io::stdout().lock())
        .context("Failed to write report to stdout")?;

    if args.dictionaries.is_empty() {
        return Ok(());
    }

    // 4. Search the dictionaries for words the wallet can spell
    let values = match &index {
        Some(index) => LetterValues::from(index),
        None => LetterValues::from_wallet(&wallet).context("Failed to derive letter values")?,
    };

    let mut finder = WordFinder::new(args.target, args.min_letters);
    for path in &args.dictionaries {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        finder
            .add_dictionary(language_of(path), file)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
    }

    let matches = finder.find(&wallet, &values).context("Word search failed")?;
    WordFinder::write_table(&matches, std::io::stdout().lock())
        .context("Failed to write word matches to stdout")?;

    if let Some(output) = &args.output {
        let file = File::create(output)
            .with_context(|| format!("Failed to create output file: {}", output.display()))?;
        WordFinder::export_csv(&matches, file)
            .with_context(|| format!("Failed to export word matches to {}", output.display()))?;
    }

    log::info!("Done");

    Ok(())
}

fn read_index(path: &Path) -> Result<CoinIndex> {
    log::info!("Reading coin value index from {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open coin value index: {}", path.display()))?;
    CoinIndex::read(file).context("Failed to read coin value index")
}

/// Dictionary label: the file name without extension.
fn language_of(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}
