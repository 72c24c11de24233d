//! Implementation of the `dsl-exec run` command.
//!
//! Validates the DSL file, resolves the executor core, runs it, and relays
//! its stdout/stderr and exit code. The `Executing: ...` announcement goes to
//! stderr so stdout carries only the executor's output.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{DslExecError, Result};
use crate::executor::{Dispatcher, InvocationRequest, relay};
use std::io::{self, Write};
use std::time::Duration;

/// Execute the `dsl-exec run` command against the process stdout/stderr.
pub fn cmd_run(args: RunArgs, config: &Config, dispatcher: Dispatcher) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(args, config, dispatcher, &mut stdout.lock(), &mut stderr.lock())
}

fn execute<O: Write, E: Write>(
    args: RunArgs,
    config: &Config,
    dispatcher: Dispatcher,
    out: &mut O,
    err: &mut E,
) -> Result<()> {
    // --timeout wins over the config file.
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .or_else(|| config.timeout());
    let dispatcher = dispatcher.with_timeout(timeout);
    let request = InvocationRequest::new(args.dsl_file, args.allow_raw);

    if args.dry_run {
        let invocation = dispatcher.prepare(&request)?;
        writeln!(out, "{}", invocation.command_line()).map_err(|e| {
            DslExecError::IoError(format!("failed to write command line: {}", e))
        })?;
        return Ok(());
    }

    let result = dispatcher.run(&request, err)?;
    relay(&result, out, err)
}
