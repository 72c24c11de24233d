//! Failure modes of a dsl-exec run and the exit status each one maps to.
//!
//! Messages are printed as-is after `Error: `, except for executor failures,
//! whose diagnostic line is written while relaying.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dsl-exec operations.
///
/// Each variant maps to an exit code; see [`DslExecError::exit_code`].
#[derive(Error, Debug)]
pub enum DslExecError {
    /// Bad configuration or otherwise unusable invocation.
    #[error("{0}")]
    UserError(String),

    /// The DSL file does not exist or cannot be read. No process is spawned.
    #[error("Invalid value for 'DSL_FILE': {0}")]
    InvalidInput(String),

    /// A resolved candidate path vanished before launch.
    #[error("Executor core binary not found at {}", .0.display())]
    BinaryMissing(PathBuf),

    /// The OS could not find the binary when launching it.
    #[error("Executor core binary not found: {0}")]
    BinaryNotFound(String),

    /// The binary exists but could not be started (permissions, bad format).
    #[error("Executor core binary not found or not executable: {program} ({message})")]
    LaunchFailed { program: String, message: String },

    /// The executor ran and exited non-zero.
    #[error("Execution failed with code {code}")]
    ExecutorFailed { code: i32 },

    /// The executor was killed by a signal and left no exit code.
    #[error("Executor terminated without an exit code")]
    ExecutorTerminated,

    /// The executor ran past the configured timeout and was killed.
    #[error("Executor timed out after {seconds}s and was killed")]
    TimedOut { seconds: u64 },

    /// Reading child output or writing relayed output failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl DslExecError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DslExecError::UserError(_) => exit_codes::USAGE_ERROR,
            DslExecError::InvalidInput(_) => exit_codes::USAGE_ERROR,
            DslExecError::ExecutorFailed { code } => i32::from(exit_codes::clamp_failure_code(*code)),
            DslExecError::BinaryMissing(_)
            | DslExecError::BinaryNotFound(_)
            | DslExecError::LaunchFailed { .. }
            | DslExecError::ExecutorTerminated
            | DslExecError::TimedOut { .. }
            | DslExecError::IoError(_) => exit_codes::FAILURE,
        }
    }

    /// Whether the relay step already wrote this error's diagnostic to stderr.
    pub fn is_reported(&self) -> bool {
        matches!(self, DslExecError::ExecutorFailed { .. })
    }
}

/// Result type alias for dsl-exec operations.
pub type Result<T> = std::result::Result<T, DslExecError>;
