//! Roster extraction from a parsed page.
//!
//! [`RosterExtractor`] runs the layout strategies in priority order and
//! keeps the first non-empty result, then normalizes positions and class
//! years, resolves profile links against the page URL and drops duplicate
//! names.

pub mod detectors;
pub mod dom;
pub mod normalize;
pub mod strategies;
pub mod team;

use crate::domain::{PlayerRecord, RawPlayer, RosterExtraction};
use crate::error::{Result, RosterError};
use detectors::clean_text;
use normalize::{normalize_position, normalize_year};
use rustc_hash::FxHashSet;
use scraper::Html;
use strategies::{skip, Harvest};
use tracing::{debug, info, warn};
use url::Url;

pub use strategies::{default_strategies, RosterStrategy};
pub use team::extract_team_info;

pub struct RosterExtractor {
    strategies: Vec<Box<dyn RosterStrategy>>,
}

impl Default for RosterExtractor {
    fn default() -> Self {
        Self::new(default_strategies())
    }
}

impl RosterExtractor {
    pub fn new(strategies: Vec<Box<dyn RosterStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub fn extract(&self, document: &Html, origin_url: &str) -> Result<RosterExtraction> {
        let page_url = Url::parse(origin_url)?;
        let base_url = page_url.origin().ascii_serialization();
        let team = extract_team_info(document, origin_url, &base_url);

        let no_roster = || RosterError::NoRosterFound {
            url: origin_url.to_string(),
        };

        let (strategy, harvest) = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let harvest = strategy.extract(document);
                debug!(
                    "Strategy '{}' found {} players ({} skipped)",
                    strategy.name(),
                    harvest.players.len(),
                    harvest.skipped
                );
                (!harvest.is_empty()).then(|| (strategy.name(), harvest))
            })
            .ok_or_else(no_roster)?;

        let (roster, skipped) = finalize(strategy, harvest, &page_url);
        if roster.is_empty() {
            return Err(no_roster());
        }

        info!(
            "Extracted {} players for {} with '{}' ({} skipped)",
            roster.len(),
            team.name,
            strategy,
            skipped
        );

        Ok(RosterExtraction {
            team,
            roster,
            strategy,
            skipped,
        })
    }
}

/// Runs the default strategy cascade over `document`.
pub fn extract_roster(document: &Html, origin_url: &str) -> Result<RosterExtraction> {
    RosterExtractor::default().extract(document, origin_url)
}

/// Absolute form of a profile href. Script, mail and fragment links carry
/// no profile and resolve to an empty string.
pub fn resolve_href(page_url: &Url, href: &str) -> std::result::Result<String, url::ParseError> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
    {
        return Ok(String::new());
    }
    page_url.join(href).map(String::from)
}

fn to_record(raw: RawPlayer, url: String) -> PlayerRecord {
    PlayerRecord {
        name: clean_text(&raw.name),
        number: raw.number.unwrap_or(0),
        position: normalize_position(&raw.position),
        year: normalize_year(&raw.year),
        height: clean_text(&raw.height),
        weight: clean_text(&raw.weight),
        hometown: clean_text(&raw.hometown),
        high_school: clean_text(&raw.high_school),
        previous_school: clean_text(&raw.previous_school),
        url,
    }
}

/// Normalizes raw players in order, keeping the first record per
/// case-insensitive name. Returns the records and the total skip count.
fn finalize(strategy: &'static str, harvest: Harvest, page_url: &Url) -> (Vec<PlayerRecord>, usize) {
    let mut skipped = harvest.skipped;
    let mut seen = FxHashSet::default();
    let mut roster = Vec::with_capacity(harvest.players.len());

    for (index, raw) in harvest.players.into_iter().enumerate() {
        let url = match resolve_href(page_url, &raw.href) {
            Ok(url) => url,
            Err(e) => {
                warn!("{}", skip(strategy, index, format!("bad link '{}': {}", raw.href, e)));
                skipped += 1;
                continue;
            }
        };

        let record = to_record(raw, url);
        if record.name.is_empty() {
            continue;
        }
        if !seen.insert(record.name.to_lowercase()) {
            debug!("Dropping duplicate player '{}'", record.name);
            continue;
        }
        roster.push(record);
    }

    (roster, skipped)
}
