use crate::domain::RosterExtraction;
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub total_teams: usize,
    pub last_updated: String,
    pub teams: Vec<ManifestEntry>,
    pub failures: Vec<ManifestFailure>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,
    pub slug: String,
    pub roster_url: String,
    pub players: usize,
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFailure {
    pub url: String,
    pub error: String,
}

impl ManifestEntry {
    pub fn new(slug: impl Into<String>, extraction: &RosterExtraction) -> Self {
        Self {
            name: extraction.team.name.clone(),
            slug: slug.into(),
            roster_url: extraction.team.roster_url.clone(),
            players: extraction.roster.len(),
            strategy: extraction.strategy.to_string(),
        }
    }
}

impl Manifest {
    pub fn new(teams: Vec<ManifestEntry>, failures: Vec<ManifestFailure>) -> Self {
        Self {
            total_teams: teams.len(),
            last_updated: Local::now().to_rfc3339(),
            teams,
            failures,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
