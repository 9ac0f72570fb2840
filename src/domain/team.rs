use serde::{Deserialize, Serialize};

pub const DEFAULT_TEAM_NAME: &str = "Unknown Team";
pub const DEFAULT_PRIMARY_COLOR: &str = "#1a1a2e";
pub const DEFAULT_SECONDARY_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub base_url: String,
    pub roster_url: String,
}

impl TeamInfo {
    pub fn new(roster_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_TEAM_NAME.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            base_url: base_url.into(),
            roster_url: roster_url.into(),
        }
    }
}
