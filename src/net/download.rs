//! HTTP downloads with optional digest verification.
//!
//! All archive URLs in the pipeline are pinned. Only the NetRexx artifact
//! carries a hard-coded digest; every other download is trusted verbatim,
//! matching the provisioning contract.

use crate::error::{Result, SetupError};
use crate::ui;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads pinned archives into a destination directory.
pub struct Downloader {
    client: Client,
    dest_dir: PathBuf,
    show_progress: bool,
}

impl Downloader {
    /// Create a downloader writing into `dest_dir` (created on demand).
    pub fn new(dest_dir: &Path, show_progress: bool) -> Result<Self> {
        fs::create_dir_all(dest_dir)?;
        let client = Client::builder()
            .user_agent(concat!("loki-setup/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| SetupError::Other(e.into()))?;
        Ok(Self {
            client,
            dest_dir: dest_dir.to_path_buf(),
            show_progress,
        })
    }

    /// Fetch `url` into the destination directory, returning the file path.
    ///
    /// The file name is taken from the last URL segment.
    pub fn fetch(&self, url: &str) -> Result<PathBuf> {
        let name = file_name_from_url(url);
        let dest = self.dest_dir.join(&name);
        self.fetch_to(url, &dest)?;
        Ok(dest)
    }

    /// Fetch `url` and verify the file's SHA-256 against `expected` (lowercase
    /// hex). On mismatch the file is re-downloaded once; a second mismatch is
    /// a hard failure.
    pub fn fetch_verified(&self, url: &str, expected: &str) -> Result<PathBuf> {
        let name = file_name_from_url(url);
        let dest = self.dest_dir.join(&name);

        self.fetch_to(url, &dest)?;
        let actual = sha256_file(&dest)?;
        if actual == expected {
            return Ok(dest);
        }

        tracing::warn!(artifact = %name, "checksum mismatch, re-downloading once");
        fs::remove_file(&dest)?;
        self.fetch_to(url, &dest)?;
        let actual = sha256_file(&dest)?;
        if actual == expected {
            Ok(dest)
        } else {
            Err(SetupError::ChecksumMismatch {
                artifact: name,
                expected: expected.to_string(),
                actual,
            })
        }
    }

    fn fetch_to(&self, url: &str, dest: &Path) -> Result<()> {
        tracing::info!(url, dest = %dest.display(), "downloading");

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SetupError::DownloadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SetupError::DownloadFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length();
        let bar = self
            .show_progress
            .then(|| ui::download_bar(total, &file_name_from_url(url)));

        let mut file = fs::File::create(dest)?;
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = response
                .read(&mut buf)
                .map_err(|e| SetupError::DownloadFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])?;
            if let Some(bar) = &bar {
                bar.inc(n as u64);
            }
        }
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        Ok(())
    }
}

/// Extract a `.tar.gz` archive into `dest_dir`, returning the top-level
/// directory the archive unpacked to (the first path component of its
/// first entry).
pub fn extract_tar_gz(archive: &Path, dest_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;

    // First pass: find the top-level directory name.
    let file = fs::File::open(archive)?;
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));
    let top = tar
        .entries()?
        .next()
        .ok_or_else(|| SetupError::StageFailed {
            stage: "extract".into(),
            message: format!("empty archive: {}", archive.display()),
        })??
        .path()?
        .components()
        .next()
        .map(|c| PathBuf::from(c.as_os_str()))
        .ok_or_else(|| SetupError::StageFailed {
            stage: "extract".into(),
            message: format!("archive entry without path: {}", archive.display()),
        })?;

    // Second pass: unpack.
    let file = fs::File::open(archive)?;
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));
    tar.unpack(dest_dir)?;

    Ok(dest_dir.join(top))
}

/// Compute a file's SHA-256 digest as lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Take the last path segment of a URL as a file name.
fn file_name_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download")
        .to_string()
}
