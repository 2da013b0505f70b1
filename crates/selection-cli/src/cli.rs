use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use selection_engine::{Command, ConfigError, EngineOptions};

#[derive(Debug, Parser)]
#[command(name = "selcmd")]
#[command(about = "Run selection commands over text read from stdin")]
pub struct Cli {
    /// TOML options file; flags given on the command line override it.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Sort lines, keeping each line's terminator.
    Sort(SortArgs),
    /// Trim whitespace from each line.
    Trim(TrimArgs),
    /// Print line, word and character counts.
    Stats,
}

/// Each option comes as an on/off pair so either value can override the config file.
#[derive(Debug, Default, Args)]
pub struct SortArgs {
    #[arg(long, conflicts_with = "case_insensitive")]
    pub case_sensitive: bool,

    #[arg(long)]
    pub case_insensitive: bool,

    /// Compare bytes instead of dictionary order.
    #[arg(long, conflicts_with = "culture")]
    pub ordinal: bool,

    /// Use dictionary order.
    #[arg(long)]
    pub culture: bool,

    #[arg(long, conflicts_with = "descending")]
    pub ascending: bool,

    #[arg(long)]
    pub descending: bool,

    #[arg(long, conflicts_with = "keep_leading_whitespace")]
    pub ignore_leading_whitespace: bool,

    #[arg(long)]
    pub keep_leading_whitespace: bool,

    #[arg(long, conflicts_with = "keep_punctuation")]
    pub ignore_punctuation: bool,

    #[arg(long)]
    pub keep_punctuation: bool,

    /// Drop lines whose sort key equals an earlier line's.
    #[arg(short, long, conflicts_with = "keep_duplicates")]
    pub unique: bool,

    #[arg(long)]
    pub keep_duplicates: bool,
}

#[derive(Debug, Default, Args)]
pub struct TrimArgs {
    /// Only trim leading whitespace.
    #[arg(long, conflicts_with = "end_only")]
    pub start_only: bool,

    /// Only trim trailing whitespace.
    #[arg(long)]
    pub end_only: bool,
}

/// Apply an on/off flag pair; with neither given the value from the file stands.
fn override_flag(value: &mut bool, on: bool, off: bool) {
    if on {
        *value = true;
    } else if off {
        *value = false;
    }
}

impl Cli {
    pub fn engine_command(&self) -> Command {
        match self.action {
            Action::Sort(_) => Command::SortLines,
            Action::Trim(_) => Command::Trim,
            Action::Stats => Command::Statistics,
        }
    }

    /// Options from the config file (or defaults), with this invocation's flags applied.
    pub fn resolve_options(&self) -> Result<EngineOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => EngineOptions::from_toml_file(path)?,
            None => EngineOptions::default(),
        };

        match &self.action {
            Action::Sort(args) => {
                let sort = &mut options.sort;
                override_flag(&mut sort.case_sensitive, args.case_sensitive, args.case_insensitive);
                override_flag(&mut sort.ordinal_comparison, args.ordinal, args.culture);
                override_flag(&mut sort.ascending, args.ascending, args.descending);
                override_flag(
                    &mut sort.ignore_leading_whitespace,
                    args.ignore_leading_whitespace,
                    args.keep_leading_whitespace,
                );
                override_flag(
                    &mut sort.ignore_punctuation,
                    args.ignore_punctuation,
                    args.keep_punctuation,
                );
                override_flag(&mut sort.eliminate_duplicates, args.unique, args.keep_duplicates);
            }
            Action::Trim(args) => {
                if args.start_only {
                    options.trim.trim_start = true;
                    options.trim.trim_end = false;
                } else if args.end_only {
                    options.trim.trim_start = false;
                    options.trim.trim_end = true;
                }
            }
            Action::Stats => {}
        }

        Ok(options)
    }
}
