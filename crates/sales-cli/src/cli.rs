//! CLI argument definitions for salesprep.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sales_model::{
    DEFAULT_DATE_KEY, DEFAULT_JOIN_SUFFIX, DEFAULT_STORE_KEY, DEFAULT_UNIQUE_THRESHOLD,
    DuplicateKeyPolicy,
};

#[derive(Parser)]
#[command(
    name = "salesprep",
    version,
    about = "Merge store-sales reference tables and profile frames",
    long_about = "Prepare store-sales data for analysis.\n\n\
                  `merge` widens the daily sales table with holidays, oil prices,\n\
                  store metadata and transactions. `profile` prints a per-column\n\
                  summary of any CSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Left-join the primary sales table with its four reference tables.
    Merge(MergeArgs),

    /// Print a per-column summary of a CSV file.
    Profile(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Directory holding train.csv, holidays_events.csv, oil.csv, stores.csv
    /// and transactions.csv. Individual paths below override discovery.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Primary sales table.
    #[arg(long = "train", value_name = "FILE")]
    pub train: Option<PathBuf>,

    /// Holiday and event calendar.
    #[arg(long = "holidays", value_name = "FILE")]
    pub holidays: Option<PathBuf>,

    /// Daily oil price series.
    #[arg(long = "oil", value_name = "FILE")]
    pub oil: Option<PathBuf>,

    /// Store metadata.
    #[arg(long = "stores", value_name = "FILE")]
    pub stores: Option<PathBuf>,

    /// Daily transactions per store.
    #[arg(long = "transactions", value_name = "FILE")]
    pub transactions: Option<PathBuf>,

    /// Where to write the merged CSV.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// How to treat reference rows that repeat a join key.
    #[arg(long = "on-duplicate", value_enum, default_value = "fan-out")]
    pub on_duplicate: DuplicateKeyArg,

    /// Name of the date key column.
    #[arg(long = "date-key", default_value = DEFAULT_DATE_KEY)]
    pub date_key: String,

    /// Name of the store identifier key column.
    #[arg(long = "store-key", default_value = DEFAULT_STORE_KEY)]
    pub store_key: String,

    /// Suffix for reference columns whose names collide with existing ones.
    #[arg(long = "suffix", default_value = DEFAULT_JOIN_SUFFIX)]
    pub suffix: String,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// CSV file to profile.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// List distinct values only for columns with fewer than this many.
    #[arg(long = "threshold", default_value_t = DEFAULT_UNIQUE_THRESHOLD)]
    pub threshold: usize,

    /// Profile only these columns, in this order (comma separated).
    #[arg(long = "columns", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Output format for the summary.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ProfileFormatArg,

    /// Write the summary to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DuplicateKeyArg {
    FanOut,
    FirstMatch,
    Reject,
}

impl From<DuplicateKeyArg> for DuplicateKeyPolicy {
    fn from(arg: DuplicateKeyArg) -> Self {
        match arg {
            DuplicateKeyArg::FanOut => DuplicateKeyPolicy::FanOut,
            DuplicateKeyArg::FirstMatch => DuplicateKeyPolicy::FirstMatch,
            DuplicateKeyArg::Reject => DuplicateKeyPolicy::Reject,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn profile_columns_split_on_commas() {
        let cli = Cli::parse_from(["salesprep", "profile", "train.csv", "--columns", "sales,family"]);
        let Command::Profile(args) = cli.command else {
            panic!("expected profile command");
        };
        assert_eq!(
            args.columns,
            Some(vec!["sales".to_string(), "family".to_string()])
        );
        assert_eq!(args.threshold, 50);
        assert_eq!(args.format, ProfileFormatArg::Table);
    }

    #[test]
    fn merge_defaults() {
        let cli = Cli::parse_from(["salesprep", "merge", "--data-dir", "data", "-o", "out.csv"]);
        let Command::Merge(args) = cli.command else {
            panic!("expected merge command");
        };
        assert_eq!(args.date_key, "date");
        assert_eq!(args.store_key, "store_nbr");
        assert_eq!(
            DuplicateKeyPolicy::from(args.on_duplicate),
            DuplicateKeyPolicy::FanOut
        );
    }
}
