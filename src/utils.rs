use rustc_hash::FxHashSet;
use std::path::Path;
use url::Url;

/// Lowercase ASCII slug: runs of anything that is not a letter or digit
/// become a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Output directory name for a roster URL, built from its host with any
/// leading `www.` removed.
pub fn slug_for_url(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());
    let slug = slugify(host.trim_start_matches("www."));
    if slug.is_empty() {
        "roster".to_string()
    } else {
        slug
    }
}

/// Output directory name for a saved HTML file.
pub fn slug_for_file(path: &Path) -> String {
    let slug = path
        .file_stem()
        .map(|stem| slugify(&stem.to_string_lossy()))
        .unwrap_or_default();
    if slug.is_empty() {
        "roster".to_string()
    } else {
        slug
    }
}

/// Hands out output slugs for one run. A slug seen before gets the first
/// free `-2`, `-3`, ... suffix.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    taken: FxHashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, slug: &str) -> String {
        let mut candidate = slug.to_string();
        let mut suffix = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{slug}-{suffix}");
            suffix += 1;
        }
        candidate
    }
}
