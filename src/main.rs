//! Star Siege - Entry Point
//!
//! Reads one battle description from stdin, resolves it with the seeded
//! engine, and writes the statistics report to stdout. Diagnostics go to
//! stderr so the report stream stays clean.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use star_siege::io::stream::resolve_stream;

/// Resolve one seeded fleet battle from stdin
#[derive(Parser, Debug)]
#[command(name = "star-siege")]
#[command(about = "Resolve a seeded fleet battle from stdin and report per-round statistics")]
struct Args {
    /// PRNG seed; must be non-zero so the random stream can advance
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    seed: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "star_siege=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    match resolve_stream(stdin.lock(), stdout.lock(), args.seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
