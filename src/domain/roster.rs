use super::{PlayerRecord, TeamInfo};
use serde::Serialize;

/// Result of one extraction run over one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterExtraction {
    pub team: TeamInfo,
    pub roster: Vec<PlayerRecord>,
    /// Name of the strategy that produced the roster.
    #[serde(skip)]
    pub strategy: &'static str,
    /// Rows or cards dropped because their fields could not be read.
    #[serde(skip)]
    pub skipped: usize,
}
