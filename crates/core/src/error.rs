//! Named failure conditions of a build.

use std::path::PathBuf;

/// Errors with a specific meaning to the pipeline.
///
/// These travel inside `anyhow::Error`; use `downcast_ref::<Error>()` to inspect them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Archive name has no recognised extension.
    #[error("Unsupported archive format: {0}")]
    UnsupportedArchive(PathBuf),

    /// Latest release has no asset matching the naming convention.
    #[error("Could not find {label} asset matching {pattern} in {repo} {tag}")]
    AssetNotFound {
        label: String,
        repo: String,
        tag: String,
        pattern: String,
    },

    /// No font files were located for a family.
    #[error("Could not find any {label} fonts matching {pattern} in {dir}")]
    NoFontsFound {
        label: String,
        pattern: String,
        dir: PathBuf,
    },

    /// Patcher executable is missing from the extracted patcher archive.
    #[error("Nerd Font patcher not found at {0}")]
    PatcherNotFound(PathBuf),

    /// Patcher exited successfully but wrote nothing recognisable.
    #[error("No patched font found in {0}")]
    NoPatchedOutput(PathBuf),

    /// External tool exited unsuccessfully.
    #[error("{tool} failed with {}{}", exit_status(.code), stderr_suffix(.stderr))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    match stderr.trim() {
        "" => String::new(),
        text => format!(": {text}"),
    }
}
