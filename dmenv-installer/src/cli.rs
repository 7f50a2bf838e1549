use anyhow::{Context, Result};
use clap::Parser;
use dmenv_installer_lib::config::{Config, DEFAULT_CHUNK_SIZE};
use dmenv_installer_lib::destination::resolve_destination;
use dmenv_installer_lib::github::GitHubClient;
use dmenv_installer_lib::installer;
use dmenv_installer_lib::ui;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dmenv-installer")]
#[command(about = "Download and install the dmenv binary for this platform")]
#[command(version)]
pub struct Cli {
    /// Where to install dmenv. When omitted, pick a writable directory from PATH interactively
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Replace an existing dmenv at the destination
    #[arg(long)]
    pub upgrade: bool,

    /// Release tag to install (defaults to the release this installer is pinned to)
    #[arg(long, value_name = "TAG")]
    pub release: Option<String>,

    /// Number of bytes read from the network at a time
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: u64,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.config()?;
        let platform = config.platform()?;

        let destination = resolve_destination(
            self.dest.as_deref(),
            platform,
            &config.tool_name,
            config.search_path.as_deref(),
            io::stdin().lock(),
            io::stdout().lock(),
        )
        .context("Failed to choose an install location")?;

        let github_client = GitHubClient::new()?;
        let size = installer::install(&config, &github_client, &destination, self.upgrade)
            .await
            .context(format!("Failed to install {} {}", config.tool_name, config.release))?;

        ui::success(&format!(
            "Installed {} {} to {} ({} bytes)",
            config.tool_name,
            config.release,
            destination.display(),
            size
        ));
        ui::tip(&format!("Run `{} --help` to get started.", config.tool_name));
        Ok(())
    }

    fn config(&self) -> Result<Config> {
        let defaults = Config::from_env();
        Ok(Config {
            release: self.release.clone().unwrap_or(defaults.release.clone()),
            chunk_size: usize::try_from(self.chunk_size).context("Chunk size is too large")?,
            ..defaults
        })
    }
}
