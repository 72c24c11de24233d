//! Executor core dispatch.
//!
//! The dispatcher runs one linear sequence per request:
//!
//! 1. Validate the DSL file (no process is spawned if it is missing)
//! 2. Resolve the executor binary from the fixed candidate list
//! 3. Pre-flight: a resolved path must still exist
//! 4. Announce the binary and target file on the log stream
//! 5. Spawn the executor, capture its output, wait for it to exit
//!
//! Relaying the result to the user is a separate step (see [`relay`]).

mod invoke;
mod locate;
mod request;
mod relay;


use crate::error::{DslExecError, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use invoke::{InvocationResult, invoke};
pub use locate::{
    BinaryLocation, CANDIDATE_PATHS, FALLBACK_NAME, LocateReport, probe_candidates, resolve_binary,
};
pub use relay::relay;
pub use request::InvocationRequest;

/// A fully prepared executor command: resolved program plus argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: BinaryLocation,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Shell-quoted command line, suitable for copy-paste.
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.display())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        shell_words::join(words)
    }
}

/// Resolves, validates, and launches the executor core.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_dir: PathBuf,
    fallback: String,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Dispatcher rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            fallback: FALLBACK_NAME.to_string(),
            timeout: None,
        }
    }

    /// Dispatcher rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            DslExecError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        Ok(Self::new(cwd))
    }

    /// Replace the bare fallback name, so tests can force a launch-time miss.
    #[cfg(test)]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the executor binary. Re-probes the filesystem on every call.
    pub fn locate(&self) -> BinaryLocation {
        resolve_binary(&self.base_dir, CANDIDATE_PATHS, &self.fallback)
    }

    /// Probe every candidate for the `locate` command.
    pub fn report(&self) -> LocateReport {
        probe_candidates(&self.base_dir, CANDIDATE_PATHS, &self.fallback)
    }

    /// Validate the request and resolve the binary without spawning anything.
    pub fn prepare(&self, request: &InvocationRequest) -> Result<Invocation> {
        request.validate(&self.base_dir)?;

        let program = self.locate();
        preflight(&program)?;

        Ok(Invocation {
            program,
            args: request.build_args(),
        })
    }

    /// Run the executor for `request` and return its captured result.
    ///
    /// Writes a single `Executing: ...` line to `log` before spawning. A
    /// non-zero exit is not an error here; see [`relay`].
    pub fn run<W: Write>(&self, request: &InvocationRequest, log: &mut W) -> Result<InvocationResult> {
        let invocation = self.prepare(request)?;

        writeln!(
            log,
            "Executing: {} using {}",
            request.dsl_file().display(),
            invocation.program.display()
        )
        .map_err(|e| DslExecError::IoError(format!("failed to write diagnostic: {}", e)))?;

        invoke(
            &invocation.program.program(),
            &invocation.args,
            &self.base_dir,
            self.timeout,
        )
    }
}

/// Fail before launch if a resolved candidate path no longer exists.
///
/// The bare fallback name is exempt; whether it exists is left to the OS
/// search path at launch time.
pub fn preflight(location: &BinaryLocation) -> Result<()> {
    match location {
        BinaryLocation::Found(path) if !path.exists() => {
            Err(DslExecError::BinaryMissing(path.clone()))
        }
        _ => Ok(()),
    }
}
