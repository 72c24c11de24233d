//! Executor binary discovery.
//!
//! The executor core is looked up in a fixed, ordered list of candidate
//! paths relative to a base directory. The first candidate that exists wins.
//! When none exist, the bare command name is returned unresolved so the OS
//! search path decides at launch time.

use serde::Serialize;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Candidate locations for the executor core, checked in this order.
pub const CANDIDATE_PATHS: &[&str] = &[
    "build/executor_core",
    "build/Release/executor_core.exe",
    "./executor_core",
    "../build/executor_core",
];

/// Bare command name used when no candidate exists.
pub const FALLBACK_NAME: &str = "executor_core";

/// Where the executor binary was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryLocation {
    /// A candidate existed; holds its absolute, normalized path.
    Found(PathBuf),
    /// No candidate existed; launch the bare name through the search path.
    Fallback(String),
}

impl BinaryLocation {
    /// The program to hand to the process launcher.
    pub fn program(&self) -> OsString {
        match self {
            BinaryLocation::Found(path) => path.clone().into_os_string(),
            BinaryLocation::Fallback(name) => OsString::from(name),
        }
    }

    /// Human-readable form for diagnostics.
    pub fn display(&self) -> String {
        match self {
            BinaryLocation::Found(path) => path.display().to_string(),
            BinaryLocation::Fallback(name) => name.clone(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, BinaryLocation::Fallback(_))
    }
}

/// Resolve the executor binary.
///
/// Probes `candidates` in order against `base_dir` and returns the first that
/// exists. Nothing is cached; every call re-probes the filesystem.
pub fn resolve_binary(base_dir: &Path, candidates: &[&str], fallback: &str) -> BinaryLocation {
    candidates
        .iter()
        .map(|candidate| absolutize(base_dir, Path::new(candidate)))
        .find(|path| path.exists())
        .map(BinaryLocation::Found)
        .unwrap_or_else(|| BinaryLocation::Fallback(fallback.to_string()))
}

/// One probed candidate, as reported by `locate`.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProbe {
    /// The candidate exactly as declared.
    pub candidate: String,
    /// The absolute path that was checked.
    pub path: PathBuf,
    pub exists: bool,
}

/// Full discovery report: every candidate plus the resolution outcome.
#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    pub base_dir: PathBuf,
    pub candidates: Vec<CandidateProbe>,
    /// The resolved program (absolute path or bare fallback name).
    pub resolved: String,
    /// True when no candidate existed and the fallback name is used.
    pub fallback: bool,
}

/// Probe every candidate and report which exist, without stopping at the first hit.
pub fn probe_candidates(base_dir: &Path, candidates: &[&str], fallback: &str) -> LocateReport {
    let probes: Vec<CandidateProbe> = candidates
        .iter()
        .map(|candidate| {
            let path = absolutize(base_dir, Path::new(candidate));
            CandidateProbe {
                candidate: candidate.to_string(),
                exists: path.exists(),
                path,
            }
        })
        .collect();

    let location = resolve_binary(base_dir, candidates, fallback);

    LocateReport {
        base_dir: base_dir.to_path_buf(),
        candidates: probes,
        resolved: location.display(),
        fallback: location.is_fallback(),
    }
}

/// Join `path` onto `base_dir` and fold `.` and `..` lexically.
///
/// Symlinks are not followed, so the result names the candidate the way it was
/// declared rather than its link target.
pub fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    let joined = base_dir.join(path);
    let mut normalized = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, same as the OS does.
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
