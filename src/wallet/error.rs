use crate::wallet::Decimal;

/// Top-level error type for wallet processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid wallet line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: HoldingError,
    },
    #[error("Invalid coin index line {line}: {source}")]
    IndexLine {
        line: usize,
        #[source]
        source: CoinValueError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors while parsing a single `<count>x <name> (<value>)` line.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum HoldingError {
    #[error("line must start with a coin count")]
    MissingCount,
    #[error("coin count must be followed by 'x'")]
    MissingSeparator,
    #[error("coin count {0:?} is not a valid number")]
    InvalidCount(String),
    #[error("coin count must be positive")]
    ZeroCount,
    #[error("line must end with a parenthesized value")]
    MissingValue,
    #[error("value {0:?} is not a valid number")]
    InvalidValue(String),
    #[error("value {0} must not be negative")]
    NegativeValue(Decimal),
    #[error("coin name is empty")]
    EmptyName,
    #[error("count times value exceeds the supported range")]
    TotalOverflow,
    #[error("wallet total exceeds the supported range")]
    WalletOverflow,
}

/// Errors while parsing a `<letter> <name> <value>` coin index line.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CoinValueError {
    #[error("line must start with a coin letter")]
    MissingLetter,
    #[error("coin name is missing")]
    MissingName,
    #[error("value {0:?} is not a valid number")]
    InvalidValue(String),
    #[error("value {0} must not be negative")]
    NegativeValue(Decimal),
    #[error("letter {0} is listed more than once")]
    DuplicateLetter(char),
}

/// Errors when the wallet disagrees with the coin values or the search target.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Coin {name:?} does not end with a coin letter")]
    MissingLetter { name: String },

    #[error("Coin {name:?} uses letter {letter}, which is not in the coin index")]
    UnknownLetter { name: String, letter: char },

    #[error("Coin {name:?} is worth {found}, but the coin index expects {expected}")]
    ValueMismatch {
        name: String,
        found: Decimal,
        expected: Decimal,
    },

    #[error("Letter {letter} is valued both {first} and {second} in the wallet")]
    ConflictingValue {
        letter: char,
        first: Decimal,
        second: Decimal,
    },

    #[error("Value of word {word:?} exceeds the supported range")]
    WordValueOverflow { word: String },

    #[error("You do not have enough money ({available} < {required})")]
    InsufficientFunds {
        available: Decimal,
        required: Decimal,
    },
}
