use serde::{Deserialize, Serialize};

/// One normalized roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    /// Jersey number, 0 when the page did not give one.
    pub number: u32,
    pub position: String,
    pub year: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub hometown: String,
    #[serde(default)]
    pub high_school: String,
    #[serde(default)]
    pub previous_school: String,
    #[serde(default)]
    pub url: String,
}

/// A player as read off the page, before normalization and URL resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPlayer {
    pub name: String,
    pub number: Option<u32>,
    pub position: String,
    pub year: String,
    pub height: String,
    pub weight: String,
    pub hometown: String,
    pub high_school: String,
    pub previous_school: String,
    pub href: String,
}

impl RawPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }
}
