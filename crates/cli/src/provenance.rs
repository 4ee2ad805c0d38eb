use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How a solution file came to be.
#[derive(Clone, Debug, Serialize)]
pub struct Run {
    pub algo: String,
    pub seed: u64,
    pub problem: PathBuf,
    pub input: Option<PathBuf>,
    pub params: Value,
    pub valid: bool,
    pub dislikes: i64,
}

/// Write `<artifact>.provenance.json` next to a solution: library version,
/// git commit, callsite, and the run that produced it.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, run: &Run) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "version": brainwall::VERSION,
        "code_rev": current_git_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "run": run,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("solution"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
