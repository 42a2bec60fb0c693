//! Release archive extraction.

use std::{
    fs::{File, create_dir_all},
    path::Path,
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::info;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format from the archive's file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

/// Unpack every member of a `.zip`, `.tar.gz` or `.tgz` archive into `dest_dir`.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let format = ArchiveFormat::from_path(archive_path)
        .ok_or_else(|| Error::UnsupportedArchive(archive_path.to_path_buf()))?;

    info!("Extracting {}...", archive_path.display());
    create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;

    match format {
        ArchiveFormat::Zip => {
            let mut archive = zip::ZipArchive::new(file).context("Failed to open zip archive")?;
            archive
                .extract(dest_dir)
                .with_context(|| format!("Failed to extract {}", archive_path.display()))?;
        }
        ArchiveFormat::TarGz => {
            let mut archive = tar::Archive::new(GzDecoder::new(file));
            archive
                .unpack(dest_dir)
                .with_context(|| format!("Failed to extract {}", archive_path.display()))?;
        }
    }

    info!("Extracted to {}", dest_dir.display());
    Ok(())
}
