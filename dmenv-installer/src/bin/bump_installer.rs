use anyhow::{Context, Result};
use clap::Parser;
use dmenv_installer_lib::bump::{BumpOptions, run_bump};
use dmenv_installer_lib::git::SystemGitClient;
use dmenv_installer_lib::github::GitHubClient;
use dmenv_installer_lib::logging::initialize_logging;
use dmenv_installer_lib::release::ReleaseSource;
use dmenv_installer_lib::ui;
use std::path::PathBuf;

/// Pin the installer to the version in tbump.toml once its release assets are published
#[derive(Parser)]
#[command(name = "bump-installer")]
#[command(version)]
struct BumpCli {
    /// Repository root
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// tbump configuration, relative to the repository root
    #[arg(long, default_value = "tbump.toml")]
    version_file: PathBuf,

    /// Source file holding the pinned release, relative to the repository root
    #[arg(long, default_value = "dmenv-installer-lib/src/release.rs")]
    source_file: PathBuf,

    /// Skip the branch and upstream checks
    #[arg(long)]
    skip_git: bool,

    /// Check everything but leave the source file untouched
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    initialize_logging();
    let cli = BumpCli::parse();

    let options = BumpOptions {
        version_file: cli.repo.join(&cli.version_file),
        source_file: cli.repo.join(&cli.source_file),
        source: ReleaseSource::default(),
        check_git: !cli.skip_git,
        dry_run: cli.dry_run,
    };
    let git_client = SystemGitClient::new(&cli.repo);
    let github_client = GitHubClient::new()?;

    let version = run_bump(&options, &git_client, &github_client)
        .await
        .context("Failed to bump installer")?;

    ui::success(&format!("Installer pinned to {version}"));
    ui::tip("Review the change and commit it.");
    Ok(())
}
