pub(crate) use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "coin_calc",
    author,
    version,
    about = "Totals a coin wallet and finds words its coins can spell",
    long_about = None,
    after_help = "INPUT:\n    One holding per line, e.g. '2x Silber Sterling W (200)'.\n\nOUTPUT:\n    The report (and any word matches) is printed to stdout, logs go to stderr.\n    Set RUST_LOG=debug for more detail:\n\n    coin_calc data/coins.txt --values data/values.txt --dictionary /usr/share/dict/ngerman"
)]
pub struct Args {
    /// Path to the wallet file
    #[arg(
        index = 1,
        value_name = "WALLET",
        default_value = "data/coins.txt",
        help = "Wallet file with lines like '<count>x <name> (<value>)'"
    )]
    pub wallet_file: PathBuf,

    /// Coin value index to validate the wallet against
    #[arg(
        long,
        value_name = "FILE",
        help = "Coin value index with lines like '<letter> <name> <value>'"
    )]
    pub values: Option<PathBuf>,

    #[arg(long, help = "Skip malformed wallet lines with a warning instead of failing")]
    pub skip_invalid: bool,

    #[arg(
        long = "dictionary",
        value_name = "FILE",
        help = "Word list to search for words the wallet can spell (repeatable)"
    )]
    pub dictionaries: Vec<PathBuf>,

    #[arg(
        long,
        value_name = "VALUE",
        default_value = "500",
        help = "Minimum value of a word, and of the wallet, for the word search"
    )]
    pub target: Decimal,

    #[arg(
        long,
        value_name = "N",
        default_value_t = 3,
        help = "Minimum number of letters a word needs to have"
    )]
    pub min_letters: usize,

    #[arg(
        long,
        value_name = "FILE",
        requires = "dictionaries",
        help = "Write word matches to this CSV file"
    )]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["coin_calc"]).unwrap();
        assert_eq!(args.wallet_file, PathBuf::from("data/coins.txt"));
        assert_eq!(args.target, Decimal::from(500));
        assert_eq!(args.min_letters, 3);
        assert!(!args.skip_invalid);
        assert!(args.dictionaries.is_empty());
    }

    #[test]
    fn test_repeated_dictionaries() {
        let args = Args::try_parse_from([
            "coin_calc",
            "wallet.txt",
            "--dictionary",
            "a.txt",
            "--dictionary",
            "b.txt",
            "--output",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(args.dictionaries.len(), 2);
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_output_requires_dictionary() {
        assert!(Args::try_parse_from(["coin_calc", "--output", "out.csv"]).is_err());
    }
}
