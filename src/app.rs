//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the combine pipeline for every selector
//! - prints summaries

use clap::Parser;
use tracing::{Level, error};

use crate::cli::{Cli, CombineArgs, Command, ShowArgs};
use crate::domain::{CombineConfig, CombineOptions};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `envelope` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    crate::telemetry::init_tracing(cli.log_json, level);

    match cli.command {
        Command::Combine(args) => handle_combine(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_combine(args: CombineArgs) -> Result<(), AppError> {
    let config = combine_config_from_args(&args);
    let results = pipeline::run_all(&config);

    let mut failures = Vec::new();
    for (_, result) in results {
        match result {
            Ok(run) if config.print_summary => {
                println!("{}", crate::report::format_run_summary(&run));
            }
            Ok(_) => {}
            Err(err) => failures.push(err),
        }
    }

    // The first failure becomes the exit status; report the rest here.
    let mut failures = failures.into_iter();
    match failures.next() {
        None => Ok(()),
        Some(first) => {
            for err in failures {
                error!("{err}");
            }
            Err(first)
        }
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_csv(&args.curve)?;
    println!(
        "{}",
        crate::report::format_curve(&curve, &args.curve.display().to_string())
    );
    Ok(())
}

pub fn combine_config_from_args(args: &CombineArgs) -> CombineConfig {
    CombineConfig {
        dir: args.dir.clone(),
        prefix: args.prefix.clone(),
        selectors: args.selectors.clone(),
        options: CombineOptions {
            validate_monotonic: args.validate_monotonic,
        },
        allow_empty_overlap: args.allow_empty_overlap,
        export_json: args.export_json,
        print_summary: !args.quiet,
    }
}
