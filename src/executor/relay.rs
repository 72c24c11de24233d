//! Relaying executor results back to the caller.
//!
//! Success writes the captured stdout verbatim. Failure writes a diagnostic
//! naming the exit code followed by the captured stderr, and returns an error
//! carrying that code.

use super::invoke::InvocationResult;
use crate::error::{DslExecError, Result};
use std::io::Write;

/// Write `result` to `out`/`err` and turn it into an outcome.
///
/// # Returns
///
/// * `Ok(())` - The executor exited 0; its stdout was written to `out`
/// * `Err(DslExecError::ExecutorFailed)` - Non-zero exit; diagnostic and stderr written to `err`
/// * `Err(DslExecError::TimedOut)` - Killed on timeout; partial stderr written to `err`
/// * `Err(DslExecError::ExecutorTerminated)` - No exit code (signal); stderr written to `err`
pub fn relay<O: Write, E: Write>(result: &InvocationResult, out: &mut O, err: &mut E) -> Result<()> {
    if result.timed_out {
        write_stream(err, &result.stderr)?;
        let seconds = result.timeout.map(|t| t.as_secs()).unwrap_or_default();
        return Err(DslExecError::TimedOut { seconds });
    }

    if result.is_success() {
        write_stream(out, &result.stdout)?;
        return Ok(());
    }

    match result.exit_code {
        Some(code) => {
            let failure = DslExecError::ExecutorFailed { code };
            writeln!(err, "{}", failure).map_err(io_error)?;
            write_stream(err, &result.stderr)?;
            Err(failure)
        }
        None => {
            write_stream(err, &result.stderr)?;
            Err(DslExecError::ExecutorTerminated)
        }
    }
}

fn write_stream<W: Write>(sink: &mut W, content: &str) -> Result<()> {
    sink.write_all(content.as_bytes()).map_err(io_error)?;
    sink.flush().map_err(io_error)
}

fn io_error(e: std::io::Error) -> DslExecError {
    DslExecError::IoError(format!("failed to relay executor output: {}", e))
}
