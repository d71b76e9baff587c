//! Entry point for the `bulls` command.

use anyhow::Context;
use bulls_cli::{App, Cli};
use bulls_common::init_logging;
use bulls_config::ConfigLoader;
use bulls_data::DataService;
use clap::Parser;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }

    // dropping the guard flushes file logs
    let _guard = init_logging(&config.logging.to_logging_config())?;
    debug!(team = %config.team.abbreviation, season = %config.team.season, "Configuration loaded");

    let service = DataService::from_config(&config)?;
    let app = App::new(config, service);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = app.run(&cli.command, &mut stdout).await {
        error!("{e}");
        return Err(e.into());
    }
    Ok(())
}
