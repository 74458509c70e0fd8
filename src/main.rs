use clap::Parser;
use std::process::ExitCode;

use reckon::cli::Cli;

fn main() -> ExitCode {
    // Errors are reported by `Cli::run` itself
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
