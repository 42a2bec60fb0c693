//! External outline-font tools.
//!
//! Glyph editing and Nerd Font patching run as subprocesses. [`FontTools`] is the seam
//! the pipeline talks to, so builds can run against a stand-in.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, Result};

use crate::{config::PATCHER_FLAGS, error::Error};

/// Captured output of a tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait FontTools {
    /// Run a glyph-editing script to completion, capturing its output.
    fn run_script(&self, script: &Path) -> Result<ToolOutput>;

    /// Run the patcher executable on `font`, writing into `out_dir`.
    fn run_patcher(&self, patcher: &Path, font: &Path, out_dir: &Path) -> Result<()>;
}

/// Real subprocess invocations.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    fontforge: PathBuf,
}

impl ExternalTools {
    pub fn new(fontforge: impl Into<PathBuf>) -> Self {
        Self {
            fontforge: fontforge.into(),
        }
    }

    pub fn fontforge(&self) -> &Path {
        &self.fontforge
    }

    /// First line the glyph editor prints for `-version`, if it can be launched.
    pub fn fontforge_version(&self) -> Option<String> {
        let output = Command::new(&self.fontforge)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let line = text.lines().map(str::trim).find(|line| !line.is_empty());
        Some(line.unwrap_or_default().to_string())
    }
}

impl FontTools for ExternalTools {
    fn run_script(&self, script: &Path) -> Result<ToolOutput> {
        let output = Command::new(&self.fontforge)
            .arg("-script")
            .arg(script)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to launch {}", self.fontforge.display()))?;

        let result = ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: tool_name(&self.fontforge),
                code: output.status.code(),
                stderr: result.stderr,
            }
            .into());
        }
        Ok(result)
    }

    fn run_patcher(&self, patcher: &Path, font: &Path, out_dir: &Path) -> Result<()> {
        let status = Command::new(patcher)
            .args(PATCHER_FLAGS)
            .arg("-out")
            .arg(out_dir)
            .arg(font)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to launch {}", patcher.display()))?;

        if !status.success() {
            return Err(Error::ToolFailed {
                tool: tool_name(patcher),
                code: status.code(),
                stderr: String::new(),
            }
            .into());
        }
        Ok(())
    }
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(OsStr::new("tool"))
        .to_string_lossy()
        .into_owned()
}
