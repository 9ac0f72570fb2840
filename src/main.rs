use rosterscout::config::cli::Command;
use rosterscout::config::Config;
use rosterscout::error::{Result, RosterError};
use rosterscout::infrastructure::{FileSystemStore, HttpDocumentProvider};
use rosterscout::services::{save_outcomes, BatchExtractor, RosterService, ScrapingService};
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    let level = config.args.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    config.ensure_directories()?;
    let store = Arc::new(FileSystemStore::new(&config.args.data_dir));

    let manifest = match &config.args.command {
        Command::Scrape { .. } => {
            let provider = HttpDocumentProvider::new(config.http_client.clone());
            let service = RosterService::new(
                store,
                ScrapingService::new(provider),
                config.args.save_html,
            );
            service.process(&config.sources).await?
        }
        Command::Extract { files, origin } => {
            let outcomes = BatchExtractor::new(origin.as_str()).run(files)?;
            save_outcomes(store.as_ref(), outcomes)?
        }
    };

    if manifest.total_teams == 0 {
        return Err(RosterError::Other(format!(
            "no roster extracted from {} sources",
            manifest.failures.len()
        )));
    }

    info!("Saved {} rosters to {}", manifest.total_teams, config.args.data_dir.display());
    Ok(())
}
