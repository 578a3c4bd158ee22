use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use super::coin_index::CoinIndex;
use super::error::{Error, ValidationError};
use super::inventory::Wallet;
use super::Decimal;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(3);

/// Serialize Decimal without trailing zeros
fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.normalize().to_string())
}

/// Value of each coin letter used when scoring words.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LetterValues(BTreeMap<char, Decimal>);

impl LetterValues {
    pub fn get(&self, letter: char) -> Option<Decimal> {
        self.0.get(&letter).copied()
    }

    /// Derive letter values from the wallet's own unit values.
    /// Holdings without a coin letter are ignored.
    pub fn from_wallet(wallet: &Wallet) -> Result<Self, ValidationError> {
        let mut values: BTreeMap<char, Decimal> = BTreeMap::new();
        for holding in wallet.holdings() {
            let Some(letter) = holding.letter() else {
                log::debug!("[letters] {:?} has no coin letter", holding.name());
                continue;
            };
            match values.get(&letter) {
                Some(&first) if first != holding.unit_value() => {
                    return Err(ValidationError::ConflictingValue {
                        letter,
                        first,
                        second: holding.unit_value(),
                    });
                }
                Some(_) => {}
                None => {
                    values.insert(letter, holding.unit_value());
                }
            }
        }
        Ok(Self(values))
    }
}

impl From<&CoinIndex> for LetterValues {
    fn from(index: &CoinIndex) -> Self {
        Self(index.iter().map(|coin| (coin.letter(), coin.value())).collect())
    }
}

impl FromIterator<(char, Decimal)> for LetterValues {
    fn from_iter<I: IntoIterator<Item = (char, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A dictionary word the wallet can spell, with its coin value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordMatch {
    word: String,
    language: String,
    #[serde(serialize_with = "serialize_decimal")]
    value: Decimal,
}

impl WordMatch {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

#[derive(Debug)]
struct Dictionary {
    language: String,
    words: Vec<String>,
}

/// Searches word lists for words that can be laid out with the wallet's
/// coin letters and are worth at least `target`.
#[derive(Debug)]
pub struct WordFinder {
    target: Decimal,
    min_letters: usize,
    dictionaries: Vec<Dictionary>,
}

impl WordFinder {
    pub fn new(target: Decimal, min_letters: usize) -> Self {
        Self {
            target,
            min_letters,
            dictionaries: Vec::new(),
        }
    }

    /// Load a word list, one word per line. Words are upper-cased.
    pub fn add_dictionary<R: Read>(
        &mut self,
        language: impl Into<String>,
        reader: R,
    ) -> Result<(), Error> {
        let language = language.into();
        let mut words = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_uppercase());
            }
        }

        log::info!("Loaded {} words for {language}", words.len());
        self.dictionaries.push(Dictionary { language, words });
        Ok(())
    }

    pub fn word_count(&self) -> usize {
        self.dictionaries.iter().map(|d| d.words.len()).sum()
    }

    /// Find all words worth at least the target, sorted by value ascending.
    /// Fails if the whole wallet is worth less than the target.
    pub fn find(&self, wallet: &Wallet, values: &LetterValues) -> Result<Vec<WordMatch>, Error> {
        let available = wallet.grand_total();
        if available < self.target {
            return Err(ValidationError::InsufficientFunds {
                available,
                required: self.target,
            }
            .into());
        }

        let letters = wallet.letter_counts();
        let word_count = self.word_count();
        log::info!(
            "Searching {word_count} words for value >= {} with {} coins",
            self.target,
            wallet.coin_count()
        );

        let mut matches = Vec::new();
        let mut next_report = Instant::now() + PROGRESS_INTERVAL;
        let words = self
            .dictionaries
            .iter()
            .flat_map(|d| d.words.iter().map(move |w| (d.language.as_str(), w)));

        for (index, (language, word)) in words.enumerate() {
            let now = Instant::now();
            if now > next_report {
                log::info!("Analyzing {:.1}%", percent(index, word_count));
                next_report = now + PROGRESS_INTERVAL;
            }

            if word.chars().count() < self.min_letters {
                continue;
            }

            // Skip the words the wallet cannot lay out
            let Some(value) = score(word, &letters, values)? else {
                continue;
            };
            if value < self.target {
                continue;
            }

            log::trace!("[words] {word} ({language}) = {value}");
            matches.push(WordMatch {
                word: word.clone(),
                language: language.to_string(),
                value: value.normalize(),
            });
        }

        matches.sort_by_key(|m| m.value);
        log::info!("Search complete: {} matches", matches.len());
        Ok(matches)
    }

    /// Write matches as an aligned text table to any sink.
    pub fn write_table<W: Write>(matches: &[WordMatch], mut writer: W) -> Result<(), Error> {
        for m in matches {
            writeln!(
                writer,
                "{:>10}  {} ({})",
                m.value.to_string(),
                m.word,
                m.language
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write matches as CSV with header `word,language,value`.
    /// The CSV writer is buffered, so don't wrap `writer` in a `BufWriter`.
    pub fn export_csv<W: Write>(matches: &[WordMatch], writer: W) -> Result<(), Error> {
        log::info!("Exporting {} matches", matches.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for m in matches {
            csv_writer.serialize(m)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(index: usize, total: usize) -> f64 {
    100.0 * index as f64 / total.max(1) as f64
}

/// Split a word into coin letters. Umlauts and accented vowels map onto
/// their base letters, apostrophes are dropped.
fn expand_letters(word: &str) -> Vec<char> {
    let mut letters = Vec::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'Ä' => letters.extend(['A', 'E']),
            'Ö' => letters.extend(['O', 'E']),
            'Ü' => letters.extend(['U', 'E']),
            'É' | 'Ê' => letters.push('E'),
            'Â' => letters.push('A'),
            '\'' => {}
            other => letters.push(other),
        }
    }
    letters
}

/// Value of `word`, or `None` if it needs a letter the wallet lacks.
fn score(
    word: &str,
    available: &BTreeMap<char, u64>,
    values: &LetterValues,
) -> Result<Option<Decimal>, ValidationError> {
    let mut needed: BTreeMap<char, u64> = BTreeMap::new();
    for letter in expand_letters(word) {
        *needed.entry(letter).or_insert(0) += 1;
    }

    let overflow = || ValidationError::WordValueOverflow {
        word: word.to_string(),
    };
    let mut value = Decimal::ZERO;
    for (letter, count) in needed {
        let Some(letter_value) = values.get(letter) else {
            return Ok(None);
        };
        if count > available.get(&letter).copied().unwrap_or(0) {
            return Ok(None);
        }
        value = letter_value
            .checked_mul(Decimal::from(count))
            .and_then(|letters| value.checked_add(letters))
            .ok_or_else(overflow)?;
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::ParseMode;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn wallet(input: &str) -> Wallet {
        Wallet::read(Cursor::new(input), ParseMode::Strict).unwrap()
    }

    fn finder(target: Decimal, min_letters: usize, words: &str) -> WordFinder {
        let mut finder = WordFinder::new(target, min_letters);
        finder.add_dictionary("test", Cursor::new(words)).unwrap();
        finder
    }

    fn values() -> LetterValues {
        [('A', dec!(1)), ('E', dec!(2)), ('O', dec!(3)), ('T', dec!(10))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_expand_letters() {
        assert_eq!(expand_letters("ÄÖÜ"), vec!['A', 'E', 'O', 'E', 'U', 'E']);
        assert_eq!(expand_letters("ÉÊÂ"), vec!['E', 'E', 'A']);
        assert_eq!(expand_letters("O'TA"), vec!['O', 'T', 'A']);
    }

    #[test]
    fn test_score_counts_letter_values() {
        let available = BTreeMap::from([('T', 2), ('A', 1), ('E', 1)]);
        assert_eq!(score("TAT", &available, &values()), Ok(Some(dec!(21))));
    }

    #[test]
    fn test_score_rejects_unavailable_letters() {
        let available = BTreeMap::from([('T', 1), ('A', 1)]);
        // needs two T coins
        assert_eq!(score("TAT", &available, &values()), Ok(None));
        // no value for Z
        assert_eq!(score("ZA", &available, &values()), Ok(None));
    }

    #[test]
    fn test_score_expands_umlauts() {
        let available = BTreeMap::from([('T', 1), ('A', 1), ('E', 1)]);
        assert_eq!(score("TÄ", &available, &values()), Ok(Some(dec!(13))));

        let available = BTreeMap::from([('T', 1), ('A', 1)]);
        assert_eq!(score("TÄ", &available, &values()), Ok(None));
    }

    #[test]
    fn test_find_reports_word_value_overflow() {
        let wallet = wallet("1x Silber T (10)\n1x Messing T (10)\n");
        let values: LetterValues = [('T', Decimal::MAX)].into_iter().collect();
        let finder = finder(Decimal::ZERO, 1, "t\ntt\n");

        match finder.find(&wallet, &values).unwrap_err() {
            Error::Validation(ValidationError::WordValueOverflow { word }) => {
                assert_eq!(word, "TT");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_letter_values_from_wallet() {
        let wallet = wallet("2x Silber T (10)\n1x Kupfer A (1)\n1x Silber T (10)\n");
        let values = LetterValues::from_wallet(&wallet).unwrap();
        assert_eq!(values.get('T'), Some(dec!(10)));
        assert_eq!(values.get('A'), Some(dec!(1)));
        assert_eq!(values.get('E'), None);
    }

    #[test]
    fn test_letter_values_from_wallet_rejects_conflicts() {
        let wallet = wallet("1x Silber T (10)\n1x Gold T (20)\n");
        assert_eq!(
            LetterValues::from_wallet(&wallet),
            Err(ValidationError::ConflictingValue {
                letter: 'T',
                first: dec!(10),
                second: dec!(20),
            })
        );
    }

    #[test]
    fn test_find_filters_and_sorts_by_value() {
        let wallet = wallet("2x Silber T (10)\n1x Kupfer A (1)\n1x Messing E (2)\n");
        let finder = finder(dec!(12), 2, "tat\ntee\nte\nat\nt\nzet\n");

        let matches = finder.find(&wallet, &values()).unwrap();
        let words: Vec<&str> = matches.iter().map(WordMatch::word).collect();

        // TEE needs two E coins, AT is worth 11, T is too short, ZET has no Z
        assert_eq!(words, vec!["TE", "TAT"]);
        assert_eq!(matches[0].value(), dec!(12));
        assert_eq!(matches[1].value(), dec!(21));
        assert_eq!(matches[1].language(), "test");
    }

    #[test]
    fn test_find_fails_when_wallet_is_too_poor() {
        let wallet = wallet("1x Silber T (10)\n");
        let finder = finder(dec!(500), 3, "tat\n");

        match finder.find(&wallet, &values()).unwrap_err() {
            Error::Validation(ValidationError::InsufficientFunds {
                available,
                required,
            }) => {
                assert_eq!(available, dec!(10));
                assert_eq!(required, dec!(500));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_dictionary_skips_blank_lines_and_uppercases() {
        let finder = finder(dec!(0), 1, "  eins \n\nzwei\n   \n");
        assert_eq!(finder.word_count(), 2);
        assert_eq!(finder.dictionaries[0].words, vec!["EINS", "ZWEI"]);
    }

    #[test]
    fn test_export_csv() {
        let matches = vec![WordMatch {
            word: "TAT".to_string(),
            language: "ngerman".to_string(),
            value: dec!(21.00),
        }];
        let mut output = Vec::new();
        WordFinder::export_csv(&matches, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "word,language,value\nTAT,ngerman,21\n"
        );
    }

    #[test]
    fn test_write_table() {
        let matches = vec![WordMatch {
            word: "TAT".to_string(),
            language: "ngerman".to_string(),
            value: dec!(21),
        }];
        let mut output = Vec::new();
        WordFinder::write_table(&matches, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "        21  TAT (ngerman)\n");
    }
}
