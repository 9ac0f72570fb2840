use crate::domain::{Manifest, RosterExtraction, Storage, StorageKeys};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each team under `<data_dir>/<slug>/` and the batch manifest at
/// the top of `data_dir`. Existing files are replaced.
#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn team_dir(&self, slug: &str) -> PathBuf {
        self.data_dir.join(slug)
    }

    fn get_path_for_key(&self, key: &str, subdir: Option<&str>) -> PathBuf {
        match subdir {
            Some(dir) => self.data_dir.join(dir).join(format!("{}.json", key)),
            None => self.data_dir.join(format!("{}.json", key)),
        }
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(
        &self,
        key: &str,
        subdir: Option<&str>,
        data: &T,
    ) -> Result<()> {
        match subdir {
            Some(dir) => self.ensure_dir(&self.data_dir.join(dir))?,
            None => self.ensure_dir(&self.data_dir)?,
        }

        let path = self.get_path_for_key(key, subdir);
        let content = serde_json::to_string_pretty(data)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Storage for FileSystemStore {
    fn save_extraction(&self, slug: &str, extraction: &RosterExtraction) -> Result<()> {
        self.write_json_file(StorageKeys::TEAM, Some(slug), &extraction.team)?;
        self.write_json_file(StorageKeys::ROSTER, Some(slug), &extraction.roster)
    }

    fn save_page_html(&self, slug: &str, html: &str) -> Result<()> {
        let dir = self.team_dir(slug);
        self.ensure_dir(&dir)?;
        fs::write(dir.join(StorageKeys::PAGE_DEBUG), html)?;
        Ok(())
    }

    fn save_manifest(&self, manifest: &Manifest) -> Result<()> {
        self.write_json_file(StorageKeys::MANIFEST, None, manifest)
    }
}
