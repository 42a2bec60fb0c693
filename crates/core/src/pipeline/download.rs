use std::{fs::write, path::Path};

use anyhow::{Context, Result, bail};
use log::info;
use reqwest::blocking::Client;

use crate::io::ensure_parent_dir;

/// Download `url` to `dest`, creating parent directories and overwriting any existing file.
pub fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {url}...");

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("HTTP {status} for {url}");
    }

    let bytes = response.bytes()?;
    write_download(dest, &bytes)?;

    let size_mb = bytes.len() as f64 / 1024.0 / 1024.0;
    info!("Downloaded to {} ({size_mb:.2} MB)", dest.display());
    Ok(())
}

fn write_download(dest: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(dest)?;
    write(dest, bytes).with_context(|| format!("Failed to write {}", dest.display()))
}
