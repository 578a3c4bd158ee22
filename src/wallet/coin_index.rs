use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use super::error::{CoinValueError, Error, ValidationError};
use super::inventory::Wallet;
use super::Decimal;

/// One entry of the coin value index: `<letter> <name> <value>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinValue {
    letter: char,
    name: String,
    value: Decimal,
}

impl CoinValue {
    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl FromStr for CoinValue {
    type Err = CoinValueError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut chars = line.chars();
        let letter = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .ok_or(CoinValueError::MissingLetter)?;

        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return Err(CoinValueError::MissingLetter);
        }

        let (name, value) = rest
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or(CoinValueError::MissingName)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CoinValueError::MissingName);
        }

        let value = Decimal::from_str(value)
            .map_err(|_| CoinValueError::InvalidValue(value.to_string()))?;
        if value < Decimal::ZERO {
            return Err(CoinValueError::NegativeValue(value));
        }

        Ok(CoinValue {
            letter,
            name: name.to_string(),
            value: value.normalize(),
        })
    }
}

/// Canonical coin values keyed by coin letter.
#[derive(Debug, Default)]
pub struct CoinIndex {
    coins: BTreeMap<char, CoinValue>,
}

impl CoinIndex {
    /// Read the index from any source. Blank lines are ignored, letters must be unique.
    pub fn read<R: Read>(reader: R) -> Result<Self, Error> {
        log::info!("Reading coin value index");

        let mut coins = BTreeMap::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_num = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let coin: CoinValue = line.parse().map_err(|source| Error::IndexLine {
                line: line_num,
                source,
            })?;
            if coins.contains_key(&coin.letter) {
                return Err(Error::IndexLine {
                    line: line_num,
                    source: CoinValueError::DuplicateLetter(coin.letter),
                });
            }

            log::trace!(
                "[line {line_num}] {} = {:?} ({})",
                coin.letter,
                coin.name,
                coin.value
            );
            coins.insert(coin.letter, coin);
        }

        log::info!("Coin value index has {} letters", coins.len());
        Ok(Self { coins })
    }

    pub fn get(&self, letter: char) -> Option<&CoinValue> {
        self.coins.get(&letter)
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoinValue> {
        self.coins.values()
    }

    /// Check every holding against the index: it must carry a known coin letter
    /// and its unit value must equal the indexed value.
    pub fn validate(&self, wallet: &Wallet) -> Result<(), ValidationError> {
        for holding in wallet.holdings() {
            let letter = holding
                .letter()
                .ok_or_else(|| ValidationError::MissingLetter {
                    name: holding.name().to_string(),
                })?;
            let coin = self
                .get(letter)
                .ok_or_else(|| ValidationError::UnknownLetter {
                    name: holding.name().to_string(),
                    letter,
                })?;
            if holding.unit_value() != coin.value {
                return Err(ValidationError::ValueMismatch {
                    name: holding.name().to_string(),
                    found: holding.unit_value(),
                    expected: coin.value,
                });
            }
        }

        log::debug!(
            "[validate] {} holdings match the coin value index",
            wallet.holdings().len()
        );
        Ok(())
    }
}
