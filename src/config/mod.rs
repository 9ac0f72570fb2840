use crate::config::cli::{Args, Command};
use crate::error::{Result, RosterError};
use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod cli;

/// Desktop Chrome identity; several athletics sites refuse unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.5";
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub url: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            slug: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    pub sources: Vec<Source>,
}

impl SourceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub struct Config {
    pub args: Args,
    pub sources: Vec<Source>,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let sources = match &args.command {
            Command::Scrape { urls, config_file } => {
                let mut sources: Vec<Source> = urls.iter().map(Source::new).collect();
                if let Some(path) = config_file {
                    sources.extend(SourceConfig::load(path)?.sources);
                }
                if sources.is_empty() {
                    return Err(RosterError::Other(
                        "no roster URLs given; pass URLs or --config-file".to_string(),
                    ));
                }
                sources
            }
            Command::Extract { .. } => Vec::new(),
        };

        let http_client = build_http_client(Duration::from_secs(args.timeout_secs))?;

        Ok(Self {
            args,
            sources,
            http_client,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir {} exists", self.args.data_dir.display());
        Ok(())
    }
}

pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));

    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn scrape_sources_combine_urls_and_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sources":[{{"url":"https://b.test/roster","slug":"bees"}},{{"url":"https://c.test/roster"}}]}}"#
        )
        .unwrap();

        let args = Args::parse_from([
            "rosterscout",
            "--timeout-secs",
            "5",
            "scrape",
            "https://a.test/roster",
            "--config-file",
            file.path().to_str().unwrap(),
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(
            config.sources,
            vec![
                Source::new("https://a.test/roster"),
                Source {
                    url: "https://b.test/roster".into(),
                    slug: Some("bees".into()),
                },
                Source::new("https://c.test/roster"),
            ]
        );
    }

    #[test]
    fn scrape_without_sources_is_an_error() {
        let args = Args::parse_from(["rosterscout", "scrape"]);
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn extract_requires_files_and_origin() {
        assert!(Args::try_parse_from(["rosterscout", "extract", "--origin", "https://a.test"]).is_err());
        assert!(Args::try_parse_from(["rosterscout", "extract", "page.html"]).is_err());

        let args = Args::parse_from([
            "rosterscout",
            "--save-html",
            "extract",
            "page.html",
            "--origin",
            "https://a.test/roster",
        ]);
        assert!(args.save_html);
        assert!(matches!(args.command, Command::Extract { ref files, .. } if files.len() == 1));
    }
}
