//! dsl-exec hands a DSL file to the `executor_core` binary and relays what it
//! prints. The executor's own exit code becomes ours; anything that stops it
//! from running exits 1, and a bad DSL path exits 2.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod exit_codes;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Executor failures were already relayed with their stderr.
            if !err.is_reported() {
                eprintln!("Error: {}", err);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
