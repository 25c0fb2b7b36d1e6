//! Command-line parsing for the envelope combiner.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the combination code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "envelope", version, about = "Combine two interaction curves into a conservative envelope")]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Combine `<prefix>-<n>-1.csv` and `<prefix>-<n>-2.csv` into `<prefix>-<n>.csv`.
    Combine(CombineArgs),
    /// Print a two-row curve CSV as a table.
    Show(ShowArgs),
}

/// Options for combining curve pairs.
#[derive(Debug, Args, Clone)]
pub struct CombineArgs {
    /// Directory holding the input curves; the output is written next to them.
    #[arg(long, env = "ENVELOPE_DIR", default_value = "./TempFiles")]
    pub dir: PathBuf,

    /// File name prefix shared by inputs and output.
    #[arg(long, env = "ENVELOPE_PREFIX", default_value = "SLS-chart-SLS")]
    pub prefix: String,

    /// Combination instance(s) to process. Repeat for several independent pairs.
    ///
    /// Any integer is accepted, including negative ones (`-n -1` names `<prefix>--1-1.csv`).
    #[arg(short = 'n', long = "selector", default_value = "0", allow_negative_numbers = true)]
    pub selectors: Vec<i64>,

    /// Reject curves whose y-values are not strictly monotonic after filtering.
    #[arg(long)]
    pub validate_monotonic: bool,

    /// Write an empty envelope instead of failing when the curves do not overlap.
    ///
    /// The file then holds two empty rows; it marks "no overlap" and is not a loadable curve.
    #[arg(long)]
    pub allow_empty_overlap: bool,

    /// Also write `<prefix>-<n>.json` with intermediates and per-point attribution.
    #[arg(long)]
    pub export_json: bool,

    /// Do not print the per-selector summary.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for printing a curve.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Two-row curve CSV (x row, then y row).
    #[arg(value_name = "CSV")]
    pub curve: PathBuf,
}
