//! Nerd Font patching of the merged font.

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

use crate::{config::PATCHED_MARKER, error::Error, io::glob_fonts, tools::FontTools};

/// Patch `font` with the patcher found at `patcher_dir/executable`, writing into `output_dir`.
///
/// Returns the patched file; when several are produced the first is returned.
pub fn patch_font(
    tools: &dyn FontTools,
    font: &Path,
    patcher_dir: &Path,
    executable: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let name = font.file_name().unwrap_or_default().to_string_lossy();
    info!("Patching {name} with Nerd Fonts...");

    let patcher = patcher_dir.join(executable);
    if !patcher.is_file() {
        return Err(Error::PatcherNotFound(patcher).into());
    }

    create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    tools.run_patcher(&patcher, font, output_dir)?;

    let extension = font
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("ttf");
    let patched = glob_fonts(output_dir, &format!("*{PATCHED_MARKER}*.{extension}"))?;
    let Some(first) = patched.into_iter().next() else {
        return Err(Error::NoPatchedOutput(output_dir.to_path_buf()).into());
    };

    info!("Patched font created: {}", first.display());
    Ok(first)
}
