pub mod batch;
pub mod roster_service;
pub mod scraping;

pub use batch::{save_outcomes, BatchExtractor, BatchOutcome};
pub use roster_service::RosterService;
pub use scraping::{extract_html, ScrapingService};
