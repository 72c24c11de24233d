use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Held for as long as any test has moved the process cwd.
static CWD_HELD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Runs a test from inside `dir`, restoring the previous cwd on drop.
///
/// `Dispatcher::from_current_dir` reads the process cwd, so dispatch tests
/// chdir into a temp tree first.
pub(crate) struct DirGuard {
    previous: PathBuf,
    _held: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(dir: &Path) -> Self {
        let held = match CWD_HELD.lock() {
            Ok(held) => held,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self {
            previous,
            _held: held,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// Write an executable `/bin/sh` script standing in for the executor core.
///
/// Parent directories are created as needed.
#[cfg(unix)]
pub(crate) fn write_script(dir: &Path, relative: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Write a DSL file with a trivial command in it.
pub(crate) fn write_dsl(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "command test: target: wsl params: []\n").unwrap();
    path
}
