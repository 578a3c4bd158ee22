//! Basic example of using `Wallet` and `WordFinder`.
//!
//! Run with: `cargo run --example basic`

use coin_calc::{CoinIndex, LetterValues, ParseMode, Wallet, WordFinder};
use rust_decimal::Decimal;
use std::io::Cursor;

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Sample wallet and coin values
    let coins = r"1x Silber Sterling K (100)
2x Silber Sterling W (200)
3x Kupfer Taler A (5)
2x Messing Groschen E (20)
1x Gold Krone T (150)
";
    let values = r"A Kupfer Taler 5
E Messing Groschen 20
K Silber Sterling 100
T Gold Krone 150
W Silber Sterling 200
";
    let words = "Tat\nWeck\nWette\nKate\nTee\n";

    let wallet = Wallet::read(Cursor::new(coins), ParseMode::Strict).expect("Failed to read wallet");
    let index = CoinIndex::read(Cursor::new(values)).expect("Failed to read coin values");
    index.validate(&wallet).expect("Wallet does not match coin values");

    println!("\n=== Wallet ===");
    wallet
        .write_report(std::io::stdout())
        .expect("Failed to write report");

    let mut finder = WordFinder::new(Decimal::from(300), 3);
    finder
        .add_dictionary("demo", Cursor::new(words))
        .expect("Failed to load words");
    let matches = finder
        .find(&wallet, &LetterValues::from(&index))
        .expect("Word search failed");

    println!("\n=== Words worth at least 300 ===");
    WordFinder::export_csv(&matches, std::io::stdout()).expect("Failed to export matches");
}
