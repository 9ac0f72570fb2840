use crate::domain::{DocumentProvider, FetchedPage};
use crate::error::{Result, RosterError};
use reqwest::Client;
use tracing::{error, info};

/// Fetches roster pages over HTTP with the shared client built by the
/// config layer.
pub struct HttpDocumentProvider {
    client: Client,
}

impl HttpDocumentProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DocumentProvider for HttpDocumentProvider {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        info!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("{} answered with status {}", url, status);
            return Err(RosterError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        if final_url != url {
            info!("Redirected to {}", final_url);
        }
        let html = response.text().await?;
        info!("Received {} bytes", html.len());

        Ok(FetchedPage { html, final_url })
    }
}
