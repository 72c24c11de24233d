//! Exit code constants for the dsl-exec CLI.
//!
//! - 0: Success (executor exited 0)
//! - 1: Failure (binary missing, launch failure, timeout, unexpected error)
//! - 2: Usage error (bad arguments, unreadable DSL file)
//!
//! When the executor itself fails, its own exit code is propagated instead.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Binary not found, launch failure, or any other unexpected failure.
pub const FAILURE: i32 = 1;

/// Rejected arguments. Matches the code clap uses for its own parse errors.
pub const USAGE_ERROR: i32 = 2;

/// Clamp an arbitrary exit code into the range a process can report.
///
/// Codes outside `1..=255` (negative Windows codes, large NTSTATUS values,
/// or a nonsensical 0 for a failure) collapse to [`FAILURE`].
pub fn clamp_failure_code(code: i32) -> u8 {
    match u8::try_from(code) {
        Ok(0) | Err(_) => FAILURE as u8,
        Ok(c) => c,
    }
}
