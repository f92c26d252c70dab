//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use uilog_cli::config::ThresholdOverrides;

#[derive(Parser)]
#[command(
    name = "uilog",
    version,
    about = "Turn UI logs into object-centric event logs",
    long_about = "Turn UI interaction logs into object-centric event logs.\n\n\
                  Classifies the columns of a CSV UI log, recognizes UI objects and their\n\
                  containment hierarchy, and writes events, ui_objects and process_objects\n\
                  as one JSON document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a UI log and write the object-centric JSON document.
    Convert(ConvertArgs),

    /// Classify the columns of a UI log and print their roles.
    Classify(ClassifyArgs),

    /// Print the built-in UI object hierarchy and synonyms.
    Lexicon(LexiconArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output JSON file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON document.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser)]
pub struct LexiconArgs {
    #[command(flatten)]
    pub lexicon: LexiconFiles,
}

/// Input file, thresholds and ambiguity handling shared by the pipeline commands.
#[derive(Args)]
pub struct InputArgs {
    /// CSV UI log, rows in ascending timestamp order.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML file with a [thresholds] table.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// How ambiguous columns are decided.
    #[arg(long = "resolve", value_enum, default_value = "prompt")]
    pub resolve: ResolveArg,

    #[command(flatten)]
    pub lexicon: LexiconFiles,
}

/// Threshold overrides; each wins over the config file.
#[derive(Args, Default)]
pub struct ThresholdArgs {
    /// Maximum uniqueness ratio of a UI object type column.
    #[arg(long = "threshold-ui-object", value_name = "RATIO")]
    pub ui_object: Option<f64>,

    /// Maximum uniqueness ratio of the event column.
    #[arg(long = "threshold-activity", value_name = "RATIO")]
    pub activity: Option<f64>,

    /// Uniqueness ratio below which an attribute is a context attribute.
    #[arg(long = "threshold-context-attribute", value_name = "RATIO")]
    pub context_attribute: Option<f64>,

    /// Minimum uniqueness ratio of the timestamp column.
    #[arg(long = "threshold-timestamp", value_name = "RATIO")]
    pub timestamp: Option<f64>,

    /// Minimum completeness of the main UI object type column.
    #[arg(long = "threshold-completeness", value_name = "RATIO")]
    pub completeness: Option<f64>,
}

impl ThresholdArgs {
    pub fn overrides(&self) -> ThresholdOverrides {
        ThresholdOverrides {
            ui_object: self.ui_object,
            activity: self.activity,
            context_attribute: self.context_attribute,
            timestamp: self.timestamp,
            completeness: self.completeness,
        }
    }
}

/// Replacement word lists for the lexicon.
#[derive(Args, Default)]
pub struct LexiconFiles {
    /// File with one action label per line (first CSV column).
    #[arg(long = "action-labels", value_name = "PATH")]
    pub action_labels: Option<PathBuf>,

    /// File with one noun per line (first CSV column).
    #[arg(long = "nouns", value_name = "PATH")]
    pub nouns: Option<PathBuf>,
}

/// Ambiguity resolver choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolveArg {
    /// Ask on the terminal.
    Prompt,
    /// Take the first candidate or the context-attribute role.
    Defaults,
    /// Abort on the first ambiguity.
    Fail,
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
