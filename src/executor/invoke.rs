//! Executor subprocess invocation.
//!
//! The executor's stdout/stderr are piped and drained on reader threads while
//! the parent waits. With a timeout, the executor leads its own process group
//! so that expiry kills every process it started, not only the direct child.

use crate::error::{DslExecError, Result};
use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// How long pipes may keep draining after a timeout kill.
///
/// Output still held open by a process that left the group is dropped.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Interval between `try_wait` checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type ReaderOutput = io::Result<Vec<u8>>;

/// Result of running the executor once.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Exit code of the process (None if killed or didn't exit normally).
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
    /// The timeout that was in effect, if any.
    pub timeout: Option<Duration>,
}

impl InvocationResult {
    /// Check if the executor run was successful.
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Launch `program` with `args` in `cwd` and wait for it to finish.
///
/// With `timeout` set, the executor and its descendants are killed once it
/// runs longer than that, and the result is marked `timed_out`. Without one,
/// this blocks until the child exits.
///
/// # Returns
///
/// * `Ok(InvocationResult)` - The child ran (whatever its exit code)
/// * `Err(DslExecError::BinaryNotFound)` - The OS could not find `program`
/// * `Err(DslExecError::LaunchFailed)` - Any other spawn failure
pub fn invoke(
    program: &OsStr,
    args: &[OsString],
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<InvocationResult> {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Only isolate when a timeout needs to reach the whole tree; otherwise the
    // executor stays in the terminal's group and still receives Ctrl-C.
    let isolated = timeout.is_some();
    if isolated {
        own_process_group(&mut command);
    }

    let mut child = command.spawn().map_err(|e| launch_error(program, e))?;

    let stdout_rx = spawn_reader(child.stdout.take());
    let stderr_rx = spawn_reader(child.stderr.take());

    let waited = match timeout {
        Some(limit) => wait_until(&mut child, Instant::now() + limit),
        None => child
            .wait()
            .map(|status| (status.code(), false))
            .map_err(|e| DslExecError::IoError(format!("failed to wait for executor: {}", e))),
    };

    let (exit_code, timed_out) = match waited {
        Ok(outcome) => outcome,
        Err(e) => {
            terminate(&mut child, isolated);
            return Err(e);
        }
    };

    let drain_deadline = timed_out.then(|| Instant::now() + DRAIN_GRACE);
    let stdout = collect_output(&stdout_rx, drain_deadline, "stdout")?;
    let stderr = collect_output(&stderr_rx, drain_deadline, "stderr")?;

    Ok(InvocationResult {
        exit_code,
        stdout,
        stderr,
        timed_out,
        timeout,
    })
}

/// Map a spawn error onto the error taxonomy.
fn launch_error(program: &OsStr, err: io::Error) -> DslExecError {
    let program = program.to_string_lossy().into_owned();
    match err.kind() {
        io::ErrorKind::NotFound => DslExecError::BinaryNotFound(program),
        _ => DslExecError::LaunchFailed {
            program,
            message: err.to_string(),
        },
    }
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Drain a child pipe to completion on its own thread.
///
/// Both pipes must be drained concurrently with the wait, otherwise a child
/// that fills one pipe buffer blocks forever.
fn spawn_reader<R>(source: Option<R>) -> Receiver<ReaderOutput>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let outcome = match source {
            Some(mut source) => source.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send(outcome);
    });
    rx
}

/// Receive one stream's bytes, giving up at `deadline` if one is set.
fn collect_output(
    rx: &Receiver<ReaderOutput>,
    deadline: Option<Instant>,
    stream: &str,
) -> Result<String> {
    let lost = || DslExecError::IoError(format!("{} reader thread panicked", stream));

    let received = match deadline {
        None => rx.recv().map_err(|_| lost())?,
        Some(deadline) => {
            match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(received) => received,
                Err(RecvTimeoutError::Timeout) => return Ok(String::new()),
                Err(RecvTimeoutError::Disconnected) => return Err(lost()),
            }
        }
    };

    let bytes = received
        .map_err(|e| DslExecError::IoError(format!("failed to read executor {}: {}", stream, e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Poll the child until it exits or `deadline` passes.
///
/// On expiry the child's process group is killed. Returns (exit_code, timed_out).
fn wait_until(child: &mut Child, deadline: Instant) -> Result<(Option<i32>, bool)> {
    loop {
        let status = child.try_wait().map_err(|e| {
            DslExecError::IoError(format!("failed to check executor status: {}", e))
        })?;

        if let Some(status) = status {
            return Ok((status.code(), false));
        }
        if Instant::now() >= deadline {
            terminate(child, true);
            return Ok((None, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// SIGKILL the child (and its group when `group` is set), then reap it.
fn terminate(child: &mut Child, group: bool) {
    #[cfg(unix)]
    {
        if group {
            if let Ok(pgid) = i32::try_from(child.id()) {
                // A negative pid addresses every process in the group.
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
        }
    }
    #[cfg(not(unix))]
    let _ = group;

    let _ = child.kill();
    let _ = child.wait();
}
