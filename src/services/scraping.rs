use crate::domain::{DocumentProvider, FetchedPage, RosterExtraction};
use crate::error::Result;
use crate::extraction::RosterExtractor;
use scraper::Html;
use tracing::info;

/// Parses `html` and runs the extractor over it. The parsed tree lives
/// only for the duration of the call.
pub fn extract_html(
    extractor: &RosterExtractor,
    html: &str,
    origin_url: &str,
) -> Result<RosterExtraction> {
    let document = Html::parse_document(html);
    extractor.extract(&document, origin_url)
}

/// Fetches a page through a [`DocumentProvider`] and extracts its roster.
pub struct ScrapingService<P> {
    provider: P,
    extractor: RosterExtractor,
}

impl<P: DocumentProvider> ScrapingService<P> {
    pub fn new(provider: P) -> Self {
        info!("Created new Scraping service");
        Self {
            provider,
            extractor: RosterExtractor::default(),
        }
    }

    pub fn with_extractor(provider: P, extractor: RosterExtractor) -> Self {
        Self {
            provider,
            extractor,
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.provider.fetch(url).await
    }

    /// Links on the page resolve against the URL it was finally served from.
    pub fn extract(&self, page: &FetchedPage) -> Result<RosterExtraction> {
        extract_html(&self.extractor, &page.html, &page.final_url)
    }

    pub async fn scrape(&self, url: &str) -> Result<RosterExtraction> {
        let page = self.fetch(url).await?;
        self.extract(&page)
    }
}
