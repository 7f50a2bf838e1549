mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use dmenv_installer_lib::logging::initialize_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    initialize_logging();
    let cli = Cli::parse();
    cli.run().await
}
