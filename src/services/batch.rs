use crate::domain::{Manifest, ManifestEntry, ManifestFailure, RosterExtraction, Storage};
use crate::error::{Result, RosterError};
use crate::extraction::RosterExtractor;
use crate::services::scraping::extract_html;
use crate::utils::{slug_for_file, SlugRegistry};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of extracting one saved page.
#[derive(Debug)]
pub struct BatchOutcome {
    pub slug: String,
    pub source: String,
    pub result: Result<RosterExtraction>,
}

/// Extracts saved HTML files in parallel. Every worker reads and parses
/// its own document; only the extractor is shared.
pub struct BatchExtractor {
    origin: String,
    extractor: RosterExtractor,
    show_progress: bool,
}

impl BatchExtractor {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            extractor: RosterExtractor::default(),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| RosterError::Other(e.to_string()))?,
        );
        Ok(pb)
    }

    /// Outcomes come back in the order of `files`.
    pub fn run(&self, files: &[PathBuf]) -> Result<Vec<BatchOutcome>> {
        info!("Extracting {} saved pages", files.len());
        let pb = self.progress_bar(files.len())?;

        let outcomes = files
            .par_iter()
            .map(|path| {
                let result = std::fs::read_to_string(path)
                    .map_err(RosterError::from)
                    .and_then(|html| extract_html(&self.extractor, &html, &self.origin));
                pb.inc(1);
                BatchOutcome {
                    slug: slug_for_file(path),
                    source: path.display().to_string(),
                    result,
                }
            })
            .collect();

        pb.finish_with_message("Done extracting pages!");
        Ok(outcomes)
    }
}

/// Persists every successful outcome and a manifest covering all of them.
/// Files sharing a stem are saved under suffixed slugs in input order.
pub fn save_outcomes(store: &dyn Storage, outcomes: Vec<BatchOutcome>) -> Result<Manifest> {
    let mut teams = Vec::new();
    let mut failures = Vec::new();
    let mut slugs = SlugRegistry::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(extraction) => {
                let slug = slugs.claim(&outcome.slug);
                if slug != outcome.slug {
                    info!("{} saved as {}/ ({} is taken)", outcome.source, slug, outcome.slug);
                }
                store.save_extraction(&slug, &extraction)?;
                teams.push(ManifestEntry::new(slug, &extraction));
            }
            Err(e) => {
                warn!("Failed to extract {}: {}", outcome.source, e);
                failures.push(ManifestFailure {
                    url: outcome.source,
                    error: e.to_string(),
                });
            }
        }
    }

    let manifest = Manifest::new(teams, failures);
    store.save_manifest(&manifest)?;
    Ok(manifest)
}
