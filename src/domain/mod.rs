mod manifest;
mod player;
pub(crate) mod provider;
mod roster;
pub(crate) mod storage;
mod team;

pub use manifest::{Manifest, ManifestEntry, ManifestFailure};
pub use player::{PlayerRecord, RawPlayer};
pub use provider::{DocumentProvider, FetchedPage};
pub use roster::RosterExtraction;
pub use storage::{Storage, StorageKeys};
pub use team::{TeamInfo, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, DEFAULT_TEAM_NAME};
