use std::str::FromStr;

use crate::wallet::{error::HoldingError, Decimal};

/// A validated wallet line: `count` coins named `name`, each worth `unit_value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    count: u32,
    name: String,
    unit_value: Decimal,
    total: Decimal,
}

impl Holding {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_value(&self) -> Decimal {
        self.unit_value
    }

    /// Contribution of this holding to the wallet total (`count * unit_value`).
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// The coin letter: the last character of the name, upper-cased,
    /// when it is an ASCII letter.
    pub fn letter(&self) -> Option<char> {
        self.name
            .chars()
            .last()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
    }
}

impl FromStr for Holding {
    type Err = HoldingError;

    /// Parses `<count>x <name> (<value>)`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        let digits_end = line
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(line.len());
        if digits_end == 0 {
            return Err(HoldingError::MissingCount);
        }
        let (digits, rest) = line.split_at(digits_end);
        let rest = rest
            .strip_prefix('x')
            .ok_or(HoldingError::MissingSeparator)?;

        let count: u32 = digits
            .parse()
            .map_err(|_| HoldingError::InvalidCount(digits.to_string()))?;
        if count == 0 {
            return Err(HoldingError::ZeroCount);
        }

        let (name, value) = rest
            .strip_suffix(')')
            .and_then(|rest| rest.rsplit_once('('))
            .ok_or(HoldingError::MissingValue)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(HoldingError::EmptyName);
        }

        let value = value.trim();
        let unit_value =
            Decimal::from_str(value).map_err(|_| HoldingError::InvalidValue(value.to_string()))?;
        if unit_value < Decimal::ZERO {
            return Err(HoldingError::NegativeValue(unit_value));
        }
        let total = unit_value
            .checked_mul(Decimal::from(count))
            .ok_or(HoldingError::TotalOverflow)?;

        Ok(Holding {
            count,
            name: name.to_string(),
            unit_value: unit_value.normalize(),
            total: total.normalize(),
        })
    }
}

impl std::fmt::Display for Holding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x {} ({})", self.count, self.name, self.unit_value)
    }
}
