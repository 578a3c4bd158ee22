//! Wallet module.
//!
//! This module contains the coin processing logic including:
//! - `Holding` - One parsed wallet line
//! - `Wallet` - Aggregation and the text report
//! - `CoinIndex` - Canonical coin values and wallet validation
//! - `WordFinder` - Dictionary search for words the wallet can spell
//! - `Error` types - Parse and validation errors

mod coin_index;
mod error;
mod holding;
mod inventory;
mod words;

pub(crate) use rust_decimal::Decimal;

pub use coin_index::{CoinIndex, CoinValue};
pub use error::{CoinValueError, Error, HoldingError, ValidationError};
pub use holding::Holding;
pub use inventory::{NameTotal, ParseMode, Wallet};
pub use words::{LetterValues, WordFinder, WordMatch};
