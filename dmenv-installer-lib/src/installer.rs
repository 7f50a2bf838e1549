use crate::config::Config;
use crate::download_client::DownloadClient;
use crate::error::PlacementError;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Downloads the configured release and installs it at `destination`.
/// Returns the size of the installed executable.
pub async fn install<D: DownloadClient>(
    config: &Config,
    download_client: &D,
    destination: &Path,
    upgrade: bool,
) -> Result<u64> {
    let url = config.artifact_url()?;

    // Refuse before touching the network.
    check_existing(destination, upgrade)?;

    // Stage next to the destination so the final move is a plain rename.
    let staging_dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".dmenv-installer-")
        .suffix(".download")
        .tempfile_in(staging_dir)
        .with_context(|| {
            format!(
                "Failed to create a staging file in {}",
                staging_dir.display()
            )
        })?
        .into_temp_path();

    tracing::info!("Downloading {} to {}", url, destination.display());
    // A failed download drops `staged`, which removes the partial file.
    let size = download_client
        .download(&url, &staged, config.chunk_size)
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    place(&staged, destination, upgrade)
        .with_context(|| format!("Failed to install {}", destination.display()))?;

    Ok(size)
}

/// Fails with [PlacementError::AlreadyExists] when `destination` is occupied and `upgrade` is not set.
pub fn check_existing(destination: &Path, upgrade: bool) -> Result<(), PlacementError> {
    if !upgrade && exists(destination) {
        return Err(PlacementError::AlreadyExists(destination.to_path_buf()));
    }
    Ok(())
}

/// Moves `downloaded` to `destination` and marks it executable.
///
/// An existing destination is removed first when `upgrade` is set; otherwise nothing is touched
/// and [PlacementError::AlreadyExists] is returned.
pub fn place(downloaded: &Path, destination: &Path, upgrade: bool) -> Result<(), PlacementError> {
    if exists(destination) {
        if !upgrade {
            return Err(PlacementError::AlreadyExists(destination.to_path_buf()));
        }
        tracing::debug!("Removing existing {}", destination.display());
        fs::remove_file(destination)?;
    }

    move_file(downloaded, destination)?;
    make_executable(destination)?;
    Ok(())
}

/// Like `Path::exists`, but also true for dangling symlinks.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Renames `from` to `to`, falling back to copy + delete when a rename is impossible
/// (e.g. across filesystems).
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Err(e) = fs::rename(from, to) {
        tracing::debug!("Rename failed ({}), copying instead", e);
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
