use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};

use super::error::{Error, HoldingError};
use super::holding::Holding;
use super::Decimal;

/// How `Wallet::read` treats malformed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort on the first malformed line.
    #[default]
    Strict,
    /// Log a warning for each malformed line and keep going.
    Lenient,
}

/// Per-name aggregate of a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTotal {
    pub name: String,
    pub count: u64,
    pub total: Decimal,
}

/// The parsed contents of a wallet file.
#[derive(Debug, Default)]
pub struct Wallet {
    holdings: Vec<Holding>,
    total: Decimal,
}

impl Wallet {
    /// Create an empty `Wallet`
    pub fn new() -> Self {
        log::trace!("Wallet initialized");
        Self {
            holdings: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Primary API: Read holdings from any source (File, `Cursor`, etc.).
    /// Blank lines are ignored. Line numbers in errors are 1-based.
    pub fn read<R: Read>(reader: R, mode: ParseMode) -> Result<Self, Error> {
        log::info!("Starting wallet parsing ({mode:?})");

        let mut wallet = Self::new();
        let mut skipped = 0u64;

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_num = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            log::trace!("[line {line_num}] Parsing: {line:?}");

            if let Err(source) = wallet.push_line(&line) {
                match mode {
                    ParseMode::Strict => {
                        return Err(Error::Line {
                            line: line_num,
                            source,
                        })
                    }
                    ParseMode::Lenient => {
                        log::warn!("[line {line_num}] - Skipped: {source}");
                        skipped += 1;
                    }
                }
            }
        }

        log::info!(
            "Parsing complete: {} holdings, {} skipped",
            wallet.holdings.len(),
            skipped
        );
        Ok(wallet)
    }

    fn push_line(&mut self, line: &str) -> Result<(), HoldingError> {
        let holding: Holding = line.parse()?;
        self.total = self
            .total
            .checked_add(holding.total())
            .ok_or(HoldingError::WalletOverflow)?;

        log::trace!("Parsed: {holding}");
        self.holdings.push(holding);
        Ok(())
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Number of coins across all holdings.
    pub fn coin_count(&self) -> u64 {
        self.holdings.iter().map(|h| u64::from(h.count())).sum()
    }

    /// Sum of `count * unit_value` over every holding.
    /// Accumulated with overflow checks while reading.
    pub fn grand_total(&self) -> Decimal {
        self.total.normalize()
    }

    /// Counts and totals grouped by coin name, ordered by name.
    /// Holding totals are non-negative, so no group exceeds the checked grand total.
    pub fn totals_by_name(&self) -> Vec<NameTotal> {
        let mut groups: BTreeMap<&str, (u64, Decimal)> = BTreeMap::new();
        for holding in &self.holdings {
            let group = groups.entry(holding.name()).or_insert_with(|| {
                log::debug!("[report] New group for {:?}", holding.name());
                (0, Decimal::ZERO)
            });
            group.0 += u64::from(holding.count());
            group.1 += holding.total();
        }

        groups
            .into_iter()
            .map(|(name, (count, total))| NameTotal {
                name: name.to_string(),
                count,
                total: total.normalize(),
            })
            .collect()
    }

    /// Coins available per coin letter. Holdings without a letter are left out.
    pub fn letter_counts(&self) -> BTreeMap<char, u64> {
        let mut counts = BTreeMap::new();
        for holding in &self.holdings {
            if let Some(letter) = holding.letter() {
                *counts.entry(letter).or_insert(0) += u64::from(holding.count());
            }
        }
        counts
    }

    /// Secondary API: Write the human-readable report to any sink (Stdout, File, etc.).
    pub fn write_report<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let totals = self.totals_by_name();
        log::info!("Writing report for {} coin names", totals.len());

        let name_width = totals.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
        for total in &totals {
            writeln!(
                writer,
                "{:>6}x {:<name_width$}  {:>12}",
                total.count,
                total.name,
                total.total.to_string()
            )?;
        }
        writeln!(writer, "Your wallet is worth {} Barr.", self.grand_total())?;
        writer.flush()?;

        log::trace!("Report complete");
        Ok(())
    }
}
