//! CLI argument definitions for the TVTMS engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tvtms-engine",
    version,
    about = "TVTMS versification engine - Build mapping records from tradition data",
    long_about = "Parse a TVTMS expanded-format file into validated versification mappings.\n\n\
                  Mappings, rules, and documentation notes are stored as JSON; diagnostics\n\
                  append to a JSONL log. The apply command replays stored mappings against\n\
                  a verse text pool to produce standardized verses."
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
    /// Process a TVTMS file into validated mapping records.
    Process(ProcessArgs),

    /// Replay stored mappings against a verse pool.
    Apply(ApplyArgs),

    /// List the canonical book catalog.
    Books,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the TVTMS expanded-format file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output directory for stored records (default: <FILE's dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Verse-count table as CSV with book,chapter,verses columns.
    ///
    /// The embedded canonical table is used when omitted.
    #[arg(long = "verse-counts", value_name = "PATH")]
    pub verse_counts: Option<PathBuf>,

    /// Verse count assumed for chapters absent from the table.
    #[arg(long = "fallback-verse-count", value_name = "N")]
    pub fallback_verse_count: Option<u32>,

    /// Diagnostics log path (default: <output dir>/diagnostics.jsonl).
    #[arg(long = "diagnostics-file", value_name = "PATH")]
    pub diagnostics_file: Option<PathBuf>,

    /// Parse and validate without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Mappings JSON file produced by `process`.
    #[arg(long = "mappings", value_name = "PATH")]
    pub mappings: PathBuf,

    /// Verse pool TSV (tradition, book, chapter, verse, subverse, text).
    #[arg(long = "verses", value_name = "PATH")]
    pub verses: PathBuf,

    /// Where to write the standardized pool TSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Append replay diagnostics to this JSONL file.
    #[arg(long = "diagnostics-file", value_name = "PATH")]
    pub diagnostics_file: Option<PathBuf>,
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
