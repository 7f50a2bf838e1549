//! Pins the installer to the latest published dmenv release.
//!
//! The current version is read from `tbump.toml`, the release assets for every platform are
//! probed, and the `VERSION` constant in the installer source is rewritten in place.

use crate::download_client::DownloadClient;
use crate::error::BumpError;
use crate::git::GitClient;
use crate::release::{Platform, ReleaseSource, VERSION_LINE_PREFIX};
use crate::ui;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Branch releases are cut from.
pub const RELEASE_BRANCH: &str = "master";

#[derive(Debug, Clone)]
pub struct BumpOptions {
    /// tbump configuration holding the current version
    pub version_file: PathBuf,

    /// Source file declaring the installer's release constant
    pub source_file: PathBuf,

    /// Where release artifacts are published
    pub source: ReleaseSource,

    pub check_git: bool,
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct TbumpFile {
    version: TbumpVersion,
}

#[derive(Debug, Deserialize)]
struct TbumpVersion {
    current: String,
}

/// Runs every bump step in order and returns the new release tag.
pub async fn run_bump<G: GitClient, D: DownloadClient>(
    options: &BumpOptions,
    git_client: &G,
    download_client: &D,
) -> Result<String> {
    if options.check_git {
        check_git_status(git_client)?;
    }

    let contents = fs::read_to_string(&options.version_file)
        .with_context(|| format!("Failed to read {}", options.version_file.display()))?;
    let version = parse_current_version(&contents)?;
    ui::info(&format!("Bumping installer to {version}"));

    check_deliveries(download_client, &options.source, &version).await?;

    let source = fs::read_to_string(&options.source_file)
        .with_context(|| format!("Failed to read {}", options.source_file.display()))?;
    let patched = patch_version_line(&source, &version)?;

    if options.dry_run {
        ui::info(&format!(
            "Dry run: not writing {}",
            options.source_file.display()
        ));
    } else {
        fs::write(&options.source_file, patched)
            .with_context(|| format!("Failed to write {}", options.source_file.display()))?;
    }

    Ok(version)
}

/// Requires a clean relationship with upstream on the release branch.
/// Local modifications only produce a warning.
pub fn check_git_status<G: GitClient>(git_client: &G) -> Result<(), BumpError> {
    let branch = git_client.current_branch()?;
    if branch != RELEASE_BRANCH {
        return Err(BumpError::NotOnMainBranch {
            expected: RELEASE_BRANCH.to_string(),
            actual: branch,
        });
    }

    if !git_client.status_porcelain()?.is_empty() {
        ui::warning("Working tree has uncommitted changes");
    }

    if !git_client.commits_behind_upstream()?.is_empty() {
        return Err(BumpError::BehindUpstream);
    }

    Ok(())
}

/// Reads `version.current` from a tbump configuration and returns it as a release tag (`v` + semver).
pub fn parse_current_version(contents: &str) -> Result<String, BumpError> {
    let parsed: TbumpFile = toml::from_str(contents)?;
    let current = parsed.version.current.trim();
    let version = semver::Version::parse(current).map_err(|source| BumpError::InvalidVersion {
        version: current.to_string(),
        source,
    })?;
    Ok(format!("v{version}"))
}

/// Checks that the release has an artifact for every platform.
pub async fn check_deliveries<D: DownloadClient>(
    download_client: &D,
    source: &ReleaseSource,
    version: &str,
) -> Result<(), BumpError> {
    for platform in Platform::ALL {
        let url = source.artifact_url(version, platform);
        let status = download_client.head_status(&url).await?;
        if !(200..300).contains(&status) {
            ui::error(&format!("Checking {url}... {status}"));
            return Err(BumpError::MissingDelivery { url, status });
        }
        ui::success(&format!("Checking {url}... ok"));
    }
    Ok(())
}

/// Replaces the release constant declaration in `source` with one pinned to `version`.
/// Indentation and line endings are kept; every other line is untouched.
pub fn patch_version_line(source: &str, version: &str) -> Result<String, BumpError> {
    let mut found = false;
    let mut patched = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        let trimmed = content.trim_start();
        if trimmed.starts_with(VERSION_LINE_PREFIX) {
            found = true;
            let indent = &content[..content.len() - trimmed.len()];
            let ending = &line[content.len()..];
            patched.push_str(&format!(
                "{indent}{VERSION_LINE_PREFIX} \"{version}\";{ending}"
            ));
        } else {
            patched.push_str(line);
        }
    }

    if !found {
        return Err(BumpError::VersionLineNotFound(
            VERSION_LINE_PREFIX.to_string(),
        ));
    }
    Ok(patched)
}
