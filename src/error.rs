use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },
    #[error("No roster found at {url}: the page layout was not recognized")]
    NoRosterFound { url: String },
    #[error("Skipped {strategy} record #{index}: {reason}")]
    PartialRecord {
        strategy: &'static str,
        index: usize,
        reason: String,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

impl RosterError {
    /// True when the page itself could not be retrieved.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, RosterError::Network(_) | RosterError::Fetch { .. })
    }

    pub fn is_no_roster(&self) -> bool {
        matches!(self, RosterError::NoRosterFound { .. })
    }

    /// Hint shown to users next to the error message.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RosterError::NoRosterFound { .. } => Some(
                "The site may render its roster with JavaScript or use an unsupported layout. \
                 Try entering the roster manually instead.",
            ),
            RosterError::Network(_) | RosterError::Fetch { .. } => Some(
                "The site may block automated requests. Save the page from a browser and run \
                 `rosterscout extract` on the file.",
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
