//! Latest-release lookup on the release hosting API.

use std::{fmt, path::Path};

use anyhow::{Context, Result, bail};
use log::info;
use reqwest::blocking::{Client, ClientBuilder};
use serde::Deserialize;

use crate::{
    config::{GITHUB_API_URL, SourceSpec, USER_AGENT},
    error::Error,
    pipeline::download::download_file,
};

/// A tagged release and its downloadable files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// First asset, in listing order, accepted by `matcher`.
    pub fn find_asset(&self, matcher: &AssetMatch) -> Option<&Asset> {
        self.assets.iter().find(|asset| matcher.matches(&asset.name))
    }

    /// Asset for `source`, or [`Error::AssetNotFound`].
    pub fn asset_for(&self, source: &SourceSpec) -> Result<&Asset> {
        self.find_asset(&source.asset).ok_or_else(|| {
            Error::AssetNotFound {
                label: source.label.clone(),
                repo: source.repo.clone(),
                tag: self.tag_name.clone(),
                pattern: source.asset.to_string(),
            }
            .into()
        })
    }
}

/// Naming convention used to pick an asset out of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetMatch {
    Exact(String),
    Pattern { contains: String, suffix: String },
}

impl AssetMatch {
    pub fn exact(name: &str) -> Self {
        Self::Exact(name.to_string())
    }

    pub fn pattern(contains: &str, suffix: &str) -> Self {
        Self::Pattern {
            contains: contains.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => name == expected,
            Self::Pattern { contains, suffix } => {
                name.contains(contains.as_str()) && name.ends_with(suffix.as_str())
            }
        }
    }
}

impl fmt::Display for AssetMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "'{name}'"),
            Self::Pattern { contains, suffix } => write!(f, "'*{contains}*{suffix}'"),
        }
    }
}

/// Read-only access to releases and their assets.
pub trait ReleaseHost {
    /// Latest tagged release of an `owner/name` repository.
    fn latest_release(&self, repo: &str) -> Result<Release>;

    /// Fetch `url` into `dest`, replacing any existing file.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// GitHub REST API client.
pub struct GitHubReleases {
    client: Client,
    api_url: String,
}

impl GitHubReleases {
    pub fn new() -> Result<Self> {
        Self::with_api_url(GITHUB_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let client = client_builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, api_url))
    }

    fn with_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn latest_release_url(&self, repo: &str) -> String {
        format!("{}/repos/{repo}/releases/latest", self.api_url)
    }
}

impl ReleaseHost for GitHubReleases {
    fn latest_release(&self, repo: &str) -> Result<Release> {
        let url = self.latest_release_url(repo);
        info!("Fetching latest release from {repo}...");

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} for {url}");
        }

        let body = response.bytes()?;
        parse_release(&body).with_context(|| format!("Failed to decode release from {url}"))
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        download_file(&self.client, url, dest)
    }
}

fn client_builder() -> ClientBuilder {
    Client::builder().user_agent(USER_AGENT)
}

/// Decode a release payload.
pub fn parse_release(body: &[u8]) -> Result<Release> {
    Ok(serde_json::from_slice(body)?)
}
