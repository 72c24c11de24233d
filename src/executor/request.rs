//! Invocation requests and argument-vector construction.

use crate::error::{DslExecError, Result};
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Flag token appended to the child's argv when raw execution is allowed.
pub const ALLOW_RAW_FLAG: &str = "--allow-raw";

/// What to run: a DSL file and whether raw execution is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    dsl_file: PathBuf,
    allow_raw: bool,
}

impl InvocationRequest {
    pub fn new(dsl_file: impl Into<PathBuf>, allow_raw: bool) -> Self {
        Self {
            dsl_file: dsl_file.into(),
            allow_raw,
        }
    }

    pub fn dsl_file(&self) -> &Path {
        &self.dsl_file
    }

    /// Check that the DSL file exists, is a regular file, and can be opened.
    ///
    /// Relative paths are checked against `base_dir`, which is also the
    /// working directory the executor will run in.
    pub fn validate(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(&self.dsl_file);
        let shown = self.dsl_file.display();

        let metadata = std::fs::metadata(&path).map_err(|_| {
            DslExecError::InvalidInput(format!("Path '{}' does not exist.", shown))
        })?;

        if !metadata.is_file() {
            return Err(DslExecError::InvalidInput(format!(
                "Path '{}' is not a file.",
                shown
            )));
        }

        File::open(&path).map_err(|e| {
            DslExecError::InvalidInput(format!("Path '{}' is not readable: {}", shown, e))
        })?;

        Ok(())
    }

    /// Build the executor's argument vector (program name excluded).
    ///
    /// Always `[dsl_file]`, followed by [`ALLOW_RAW_FLAG`] when raw execution
    /// is allowed. The DSL path is forwarded exactly as given.
    pub fn build_args(&self) -> Vec<OsString> {
        build_args(&self.dsl_file, self.allow_raw)
    }
}

/// Argument vector for `dsl_file` and the raw-execution toggle.
pub fn build_args(dsl_file: &Path, allow_raw: bool) -> Vec<OsString> {
    let mut args = vec![dsl_file.as_os_str().to_os_string()];
    if allow_raw {
        args.push(OsString::from(ALLOW_RAW_FLAG));
    }
    args
}
