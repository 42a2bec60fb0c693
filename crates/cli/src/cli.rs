//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lxgw_jb_core::{BuildConfig, config::FONTFORGE_PROGRAM};

use crate::commands;

#[derive(Parser)]
#[command(name = "lxgw-jb-nerd")]
#[command(about = "Merge LXGW WenKai into JetBrains Mono and patch it with Nerd Fonts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    #[arg(long, default_value = "work")]
    pub work_dir: PathBuf,
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,
    /// Glyph-editing program used for the merge.
    #[arg(long, default_value = FONTFORGE_PROGRAM)]
    pub fontforge: PathBuf,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("work"),
            output_dir: PathBuf::from("output"),
            fontforge: PathBuf::from(FONTFORGE_PROGRAM),
        }
    }
}

impl BuildArgs {
    pub fn config(&self) -> BuildConfig {
        BuildConfig::new(&self.work_dir, &self.output_dir).with_fontforge(&self.fontforge)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the latest releases, merge and patch (default).
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Verify the glyph editor and directories without downloading anything.
    Check {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Remove the working and output directories.
    Clean {
        #[arg(long, default_value = "work")]
        work_dir: PathBuf,
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(command) => command.run(),
            None => commands::build(&BuildArgs::default()),
        }
    }
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => commands::build(&args)?,
            Commands::Check { args } => commands::check(&args)?,
            Commands::Clean {
                work_dir,
                output_dir,
            } => {
                commands::clean(&work_dir, &output_dir)?;
            }
        }
        Ok(())
    }
}
