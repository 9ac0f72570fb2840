use crate::error::Result;

/// Raw page body plus the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: String,
}

/// Source of roster pages. Parsing happens on the caller's side, so the
/// provider only has to hand back the HTML text.
#[allow(async_fn_in_trait)]
pub trait DocumentProvider {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
