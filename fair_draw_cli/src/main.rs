// CLI entry point for Fair Draw.
//
// Three steps make a verifiable draw, one subcommand each:
//   1. `commit`  before the draw: generate random text and publish its digest.
//   2. `draw`    at draw time: derive ranks from the text, parameters, and
//                total. Anyone can re-run it with the same inputs.
//   3. `verify`  afterwards: check the revealed text against the digest.
// `primes` is a diagnostic view of the prime table used for seed encoding.
//
// Usage:
//   fair-draw [--config <FILE>] [-v] <COMMAND>
//     commit [--length N] [--digest md5|sha256]
//     draw --text <TEXT> --total <N> [--params "1 2 3"] [--steps "100 5"] [--json]
//     draw --request <FILE.json> [--json]
//     verify --text <TEXT> --hash <HEX> [--digest md5|sha256]
//     primes <COUNT>
//
// Results go to stdout; logs (`RUST_LOG`, or `-v` for debug) go to stderr.
// See `fair_draw` for the draw pipeline itself.

mod cli;
mod commands;
mod commitment;
mod config;
mod digest;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use config::FairDrawConfig;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FairDrawConfig::load_or_default(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = match cli.command {
        Commands::Commit { length, digest } => {
            let length = length.unwrap_or(config.commitment_length);
            let digest = digest.unwrap_or(config.digest);
            commands::commit(&mut out, &mut rand::rng(), length, digest)?;
            ExitCode::SUCCESS
        }
        Commands::Draw(args) => {
            let request = commands::build_request(&args, &config)?;
            commands::run_draw(&mut out, &request, args.json)?;
            ExitCode::SUCCESS
        }
        Commands::Verify { text, hash, digest } => {
            let digest = digest.unwrap_or(config.digest);
            if commands::verify(&mut out, &text, &hash, digest)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Primes { count } => {
            commands::primes(&mut out, count)?;
            ExitCode::SUCCESS
        }
    };
    out.flush()?;
    Ok(code)
}

/// Log to stderr. `-v` forces debug; otherwise `RUST_LOG` applies, falling
/// back to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
