use crate::config::Source;
use crate::domain::{
    DocumentProvider, Manifest, ManifestEntry, ManifestFailure, RosterExtraction, Storage,
};
use crate::error::Result;
use crate::services::scraping::ScrapingService;
use crate::utils::{slug_for_url, SlugRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Drives the online pipeline: fetch each source, extract, persist, and
/// finish with a manifest. One failing source never stops the others.
pub struct RosterService<P> {
    store: Arc<dyn Storage>,
    scraping: ScrapingService<P>,
    save_html: bool,
    pause: Duration,
}

impl<P: DocumentProvider> RosterService<P> {
    pub fn new(store: Arc<dyn Storage + 'static>, scraping: ScrapingService<P>, save_html: bool) -> Self {
        Self {
            store,
            scraping,
            save_html,
            pause: Duration::from_secs(1),
        }
    }

    /// Delay between two requests.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub async fn process(&self, sources: &[Source]) -> Result<Manifest> {
        info!("Starting roster pipeline for {} sources", sources.len());

        let mut teams = Vec::new();
        let mut failures = Vec::new();
        let mut slugs = SlugRegistry::new();

        for (index, source) in sources.iter().enumerate() {
            if index > 0 {
                sleep(self.pause).await;
            }

            let slug = slugs.claim(
                &source
                    .slug
                    .clone()
                    .unwrap_or_else(|| slug_for_url(&source.url)),
            );

            match self.scrape_source(&source.url, &slug).await {
                Ok(extraction) => teams.push(ManifestEntry::new(slug, &extraction)),
                Err(e) => {
                    warn!("Failed to scrape {}: {}", source.url, e);
                    if let Some(suggestion) = e.suggestion() {
                        warn!("{}", suggestion);
                    }
                    failures.push(ManifestFailure {
                        url: source.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let manifest = Manifest::new(teams, failures);
        self.store.save_manifest(&manifest)?;
        info!(
            "Roster pipeline completed: {} teams, {} failures",
            manifest.total_teams,
            manifest.failures.len()
        );
        Ok(manifest)
    }

    async fn scrape_source(&self, url: &str, slug: &str) -> Result<RosterExtraction> {
        let page = self.scraping.fetch(url).await?;
        if self.save_html {
            self.store.save_page_html(slug, &page.html)?;
        }

        let extraction = self.scraping.extract(&page)?;
        self.store.save_extraction(slug, &extraction)?;
        info!("Saved {} players to {}/", extraction.roster.len(), slug);
        Ok(extraction)
    }
}
