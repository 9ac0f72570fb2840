use crate::domain::RawPlayer;
use crate::error::{Result, RosterError};
use scraper::Html;
use tracing::warn;

pub(crate) mod cards;
pub(crate) mod header_table;
pub(crate) mod heuristic_table;
pub(crate) mod link_sweep;
pub(crate) mod scan;
pub(crate) mod tables;

pub use cards::CardStrategy;
pub use header_table::HeaderTableStrategy;
pub use heuristic_table::HeuristicTableStrategy;
pub use link_sweep::LinkSweepStrategy;

/// One way of reading a roster off a page. Implementations assume a
/// particular layout and return nothing when the page does not have it.
pub trait RosterStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html) -> Harvest;
}

/// The strategies in the order they are tried.
pub fn default_strategies() -> Vec<Box<dyn RosterStrategy>> {
    vec![
        Box::new(HeaderTableStrategy),
        Box::new(HeuristicTableStrategy),
        Box::new(CardStrategy),
        Box::new(LinkSweepStrategy),
    ]
}

/// Players collected by one strategy run, plus how many entries were
/// dropped because their fields could not be read.
#[derive(Debug, Default)]
pub struct Harvest {
    pub players: Vec<RawPlayer>,
    pub skipped: usize,
}

impl Harvest {
    /// Records the outcome of reading one row or card. `Ok(None)` means the
    /// entry was not a player at all (header row, staff card) and is not
    /// counted as skipped.
    pub fn record(&mut self, outcome: Result<Option<RawPlayer>>) {
        match outcome {
            Ok(Some(player)) => self.players.push(player),
            Ok(None) => {}
            Err(e) => {
                warn!("{}", e);
                self.skipped += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

pub(crate) fn skip(strategy: &'static str, index: usize, reason: impl Into<String>) -> RosterError {
    RosterError::PartialRecord {
        strategy,
        index,
        reason: reason.into(),
    }
}
