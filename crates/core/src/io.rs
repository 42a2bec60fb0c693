//! Shared filesystem utilities.

use std::{
    fs::{copy, create_dir_all},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use log::info;

/// Find fonts matching a glob pattern in a directory, non-recursively.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.to_str().context("Invalid directory path")?;
    let pattern = format!("{}/{pattern}", Pattern::escape(dir));
    Ok(glob(&pattern)
        .with_context(|| format!("Failed to glob pattern: {pattern}"))?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect())
}

/// Find fonts matching a file name pattern anywhere below a directory.
pub fn find_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let fonts = glob_fonts(dir, &format!("**/{pattern}"))?;
    info!(
        "Found {} font files matching {pattern} in {}",
        fonts.len(),
        dir.display()
    );
    Ok(fonts)
}

/// Create parent directory if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Copy `file` into `dir` under its own name, returning the new path.
pub fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .with_context(|| format!("No file name in {}", file.display()))?;
    let target = dir.join(name);
    ensure_parent_dir(&target)?;
    copy(file, &target).with_context(|| {
        format!("Failed to copy {} to {}", file.display(), target.display())
    })?;
    Ok(target)
}
