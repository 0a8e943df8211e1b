//! CLI argument definitions for the `vpl` runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vpl",
    version,
    about = "Visual programming editor model - inspect button kinds and replay sessions",
    long_about = "Inspect the button kind registry and replay scripted editing sessions.\n\n\
                  A replay builds a column of event/action slots, applies clicks, mode\n\
                  switches and drag-and-drop moves, then prints the program IR."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// List the registered button kinds.
    Kinds,

    /// Replay a scripted editing session and print the program IR.
    Replay(ReplayArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Path to the JSON session script.
    #[arg(value_name = "SCRIPT.json")]
    pub script: PathBuf,

    /// Abort on the first failed step instead of reporting it.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Only print the summary table, not the IR.
    #[arg(long = "no-ir")]
    pub no_ir: bool,
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
