//! LXGW JB core - fetch LXGW WenKai, JetBrains Mono and the Nerd Fonts patcher, merge the
//! CJK glyphs into JetBrains Mono and patch the result.

pub mod archive;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod patch;
pub mod pipeline;
pub mod release;
pub mod select;
pub mod tools;

pub use config::{BuildConfig, FontPreference, MergedNaming, SourceSpec};
pub use error::Error;
pub use pipeline::{BuildReport, Pipeline, Versions, clean};
pub use release::{Asset, AssetMatch, GitHubReleases, Release, ReleaseHost};
pub use tools::{ExternalTools, FontTools, ToolOutput};
