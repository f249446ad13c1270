//! levelbook command-line entry point.
//!
//! Usage:
//!   levelbook --data-dir ./levels list --sort name
//!   LEVELBOOK_DATA_DIR=./levels levelbook share

use clap::Parser;
use levelbook_cli::{error_notice, Args, Console};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut err = io::stderr();
    let mut console = Console {
        input: &mut input,
        out: &mut out,
        err: &mut err,
    };
    match levelbook_cli::run(args, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_notice(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();
    if verbose {
        builder.with_max_level(Level::DEBUG).init();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        builder.with_env_filter(filter).init();
    }
}
