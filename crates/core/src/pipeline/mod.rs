//! Build pipeline: fetch sources, merge, patch, publish.

pub mod clean;
pub mod download;

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use log::info;

use crate::{
    archive::extract_archive,
    config::{BuildConfig, SourceSpec},
    io::{copy_into, find_fonts},
    merge::merge_fonts,
    patch::patch_font,
    release::ReleaseHost,
    select::select_regular,
    tools::FontTools,
};

pub use clean::clean;

/// Release tags the build was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versions {
    pub cjk: String,
    pub latin: String,
    pub patcher: String,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub final_font: PathBuf,
    pub versions: Versions,
}

/// Values produced by one step and consumed by a later one.
#[derive(Debug, Default)]
struct BuildState {
    cjk_version: Option<String>,
    latin_version: Option<String>,
    patcher_version: Option<String>,
    cjk_font: Option<PathBuf>,
    latin_font: Option<PathBuf>,
    patched_font: Option<PathBuf>,
    final_font: Option<PathBuf>,
}

type PipelineStep = (&'static str, fn(&Pipeline, &mut BuildState) -> Result<()>);

const STEPS: &[PipelineStep] = &[
    ("prepare", step_prepare),
    ("fetch-lxgw", step_fetch_cjk),
    ("fetch-jetbrains", step_fetch_latin),
    ("fetch-patcher", step_fetch_patcher),
    ("locate-fonts", step_locate_fonts),
    ("merge", step_merge),
    ("patch", step_patch),
    ("publish", step_publish),
];

/// Sequential build over an explicit configuration.
pub struct Pipeline<'a> {
    config: &'a BuildConfig,
    host: &'a dyn ReleaseHost,
    tools: &'a dyn FontTools,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a BuildConfig, host: &'a dyn ReleaseHost, tools: &'a dyn FontTools) -> Self {
        Self {
            config,
            host,
            tools,
        }
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&self) -> Result<BuildReport> {
        let mut state = BuildState::default();
        let start = Instant::now();

        for (i, (name, step)) in STEPS.iter().enumerate() {
            run_step(name, i + 1, STEPS.len(), || step(self, &mut state))?;
        }

        println!("\nBuild completed in {:.2}s", start.elapsed().as_secs_f64());

        Ok(BuildReport {
            final_font: state.final_font.context("final font not published")?,
            versions: Versions {
                cjk: state.cjk_version.context("LXGW WenKai version not resolved")?,
                latin: state.latin_version.context("JetBrains Mono version not resolved")?,
                patcher: state.patcher_version.context("Nerd Fonts version not resolved")?,
            },
        })
    }

    /// Fetch the latest release of `source` and unpack its asset into `extract_dir`.
    fn fetch_source(&self, source: &SourceSpec, extract_dir: &Path) -> Result<String> {
        let release = self
            .host
            .latest_release(&source.repo)
            .with_context(|| format!("Failed to fetch latest {} release", source.label))?;
        info!("Latest {} version: {}", source.label, release.tag_name);

        let asset = release.asset_for(source)?;
        let archive = self.config.downloads_dir().join(&asset.name);
        self.host.download(&asset.browser_download_url, &archive)?;
        extract_archive(&archive, extract_dir)?;

        Ok(release.tag_name)
    }

    fn locate_regular(&self, source: &SourceSpec, dir: &Path) -> Result<PathBuf> {
        let pattern = &self.config.font_pattern;
        let fonts = find_fonts(dir, pattern)?;
        let (font, _) = select_regular(&fonts, &source.font, &source.label, dir, pattern)?;
        Ok(font)
    }
}

fn run_step(
    name: &str,
    step_num: usize,
    total: usize,
    f: impl FnOnce() -> Result<()>,
) -> Result<()> {
    println!("\n[{step_num}/{total}] {name}");
    let start = Instant::now();
    f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(())
}

// ============================================================================
// Pipeline Steps
// ============================================================================

fn step_prepare(p: &Pipeline, _: &mut BuildState) -> Result<()> {
    for dir in p.config.all_dirs() {
        create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

fn step_fetch_cjk(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let version = p.fetch_source(&p.config.cjk, &p.config.cjk_extract_dir())?;
    state.cjk_version = Some(version);
    Ok(())
}

fn step_fetch_latin(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let version = p.fetch_source(&p.config.latin, &p.config.latin_extract_dir())?;
    state.latin_version = Some(version);
    Ok(())
}

fn step_fetch_patcher(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let patcher_dir = p.config.patcher_dir();
    let version = p.fetch_source(&p.config.patcher, &patcher_dir)?;
    make_executable(&patcher_dir.join(&p.config.patcher_executable))?;
    state.patcher_version = Some(version);
    Ok(())
}

fn step_locate_fonts(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let cjk = p.locate_regular(&p.config.cjk, &p.config.cjk_extract_dir())?;
    let latin = p.locate_regular(&p.config.latin, &p.config.latin_extract_dir())?;
    state.cjk_font = Some(cjk);
    state.latin_font = Some(latin);
    Ok(())
}

fn step_merge(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let cjk = state.cjk_font.as_deref().context("LXGW WenKai font not located")?;
    let latin = state.latin_font.as_deref().context("JetBrains Mono font not located")?;
    merge_fonts(p.tools, cjk, latin, &p.config.merged_font(), &p.config.naming)
}

fn step_patch(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let patched = patch_font(
        p.tools,
        &p.config.merged_font(),
        &p.config.patcher_dir(),
        &p.config.patcher_executable,
        &p.config.patched_dir(),
    )?;
    state.patched_font = Some(patched);
    Ok(())
}

fn step_publish(p: &Pipeline, state: &mut BuildState) -> Result<()> {
    let patched = state.patched_font.as_deref().context("patched font not produced")?;
    let published = copy_into(patched, &p.config.output_dir)?;
    info!("Final font available at: {}", published.display());
    state.final_font = Some(published);
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::{
        fs::{Permissions, set_permissions},
        os::unix::fs::PermissionsExt,
    };

    if path.exists() {
        set_permissions(path, Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names_are_unique() {
        let mut names: Vec<&str> = STEPS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STEPS.len());
    }

    #[test]
    fn test_merge_before_patch_before_publish() {
        let position = |wanted: &str| STEPS.iter().position(|(name, _)| *name == wanted).unwrap();
        assert!(position("locate-fonts") < position("merge"));
        assert!(position("merge") < position("patch"));
        assert!(position("patch") < position("publish"));
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable() {
        use std::{fs::write, os::unix::fs::PermissionsExt};

        let dir = tempfile::tempdir().unwrap();
        let patcher = dir.path().join("font-patcher");
        write(&patcher, b"#!/bin/sh\n").unwrap();
        make_executable(&patcher).unwrap();
        let mode = patcher.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        make_executable(&dir.path().join("missing")).unwrap();
    }
}
