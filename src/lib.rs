//! Wallet totals and word search for plain-text coin inventories.
//!
//! A wallet file lists one holding per line as `<count>x <name> (<value>)`.
//! [`Wallet`] parses and totals it, [`CoinIndex`] checks it against the
//! canonical coin values, and [`WordFinder`] looks for words the wallet's
//! coin letters can spell.

mod wallet;

pub use wallet::{
    CoinIndex, CoinValue, CoinValueError, Error, Holding, HoldingError, LetterValues, NameTotal,
    ParseMode, ValidationError, Wallet, WordFinder, WordMatch,
};
