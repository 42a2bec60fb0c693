//! Splicing CJK glyphs into the Latin base font.
//!
//! The glyph work happens inside the external glyph editor; this module writes the
//! instruction script it runs and keeps that script from outliving the call.

use std::{
    fs::{remove_file, write},
    io::ErrorKind,
    path::{Path, PathBuf, absolute},
};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    config::{CJK_RANGES, MergedNaming},
    io::ensure_parent_dir,
    tools::FontTools,
};

/// File name of the instruction script, written next to the merged output.
pub const MERGE_SCRIPT_NAME: &str = "merge_temp.py";

/// Inputs of one merge.
#[derive(Debug, Clone)]
pub struct MergeJob<'a> {
    /// Font the CJK glyphs are taken from.
    pub donor: &'a Path,
    /// Font receiving them; everything outside the ranges is kept.
    pub base: &'a Path,
    pub output: &'a Path,
    pub naming: &'a MergedNaming,
}

impl MergeJob<'_> {
    /// Instruction script for the glyph editor.
    pub fn script(&self) -> String {
        let ranges = CJK_RANGES
            .iter()
            .map(|(first, last)| format!("(0x{first:04X}, 0x{last:04X})"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"import fontforge

RANGES = [{ranges}]

base = fontforge.open({base})
print("Opened base font: " + base.fontname)
donor = fontforge.open({donor})
print("Opened CJK font: " + donor.fontname)

copied = 0
for first, last in RANGES:
    for codepoint in range(first, last + 1):
        if codepoint in donor:
            donor.selection.select(codepoint)
            donor.copy()
            base.selection.select(codepoint)
            base.paste()
            copied += 1
print("Copied %d glyphs" % copied)

base.familyname = {family}
base.fullname = {full}
base.fontname = {font}

output_path = {output}
base.generate(output_path)
print("Generated merged font: " + output_path)

base.close()
donor.close()
"#,
            base = py_string(&self.base.to_string_lossy()),
            donor = py_string(&self.donor.to_string_lossy()),
            output = py_string(&self.output.to_string_lossy()),
            family = py_string(&self.naming.family_name),
            full = py_string(&self.naming.full_name),
            font = py_string(&self.naming.font_name),
        )
    }
}

fn py_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Script file removed when dropped.
struct TempScript {
    path: PathBuf,
}

impl TempScript {
    fn create(path: PathBuf, contents: &str) -> Result<Self> {
        write(&path, contents)
            .with_context(|| format!("Failed to write merge script: {}", path.display()))?;
        Ok(Self { path })
    }
}

impl Drop for TempScript {
    fn drop(&mut self) {
        if let Err(e) = remove_file(&self.path)
            && e.kind() != ErrorKind::NotFound
        {
            warn!("Failed to remove {}: {e}", self.path.display());
        }
    }
}

/// Copy the CJK ranges of `donor` into `base` and write the result to `output`.
pub fn merge_fonts(
    tools: &dyn FontTools,
    donor: &Path,
    base: &Path,
    output: &Path,
    naming: &MergedNaming,
) -> Result<()> {
    info!(
        "Merging {} with {}...",
        file_label(donor),
        file_label(base)
    );

    ensure_parent_dir(output)?;
    let donor = absolute(donor)?;
    let base = absolute(base)?;
    let output = absolute(output)?;

    let job = MergeJob {
        donor: &donor,
        base: &base,
        output: &output,
        naming,
    };
    let script_path = output
        .parent()
        .map_or_else(|| PathBuf::from(MERGE_SCRIPT_NAME), |dir| dir.join(MERGE_SCRIPT_NAME));
    let script = TempScript::create(script_path, &job.script())?;

    let result = tools.run_script(&script.path)?;
    if !result.stdout.trim().is_empty() {
        info!("{}", result.stdout.trim_end());
    }
    if !result.stderr.trim().is_empty() {
        warn!("Warnings: {}", result.stderr.trim_end());
    }

    info!("Merged font created: {}", output.display());
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
