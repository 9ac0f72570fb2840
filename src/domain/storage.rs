use super::{Manifest, RosterExtraction};
use crate::error::Result;

pub trait Storage: Send + Sync {
    fn save_extraction(&self, slug: &str, extraction: &RosterExtraction) -> Result<()>;
    fn save_page_html(&self, slug: &str, html: &str) -> Result<()>;
    fn save_manifest(&self, manifest: &Manifest) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const TEAM: &'static str = "team";
    pub const ROSTER: &'static str = "roster";
    pub const PAGE_DEBUG: &'static str = "page-debug.html";
    pub const MANIFEST: &'static str = "manifest";
}
