//! HTTP baseline source.

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentSource, parse_body};
use crate::error::{Error, Result};
use crate::section::Section;

/// Fetches `<base>/<section>.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for a base URL such as `https://host/data`.
    pub fn new(base: &str) -> Result<Self> {
        Self::with_client(base, reqwest::Client::new())
    }

    /// Create a source that uses an existing client.
    pub fn with_client(base: &str, client: reqwest::Client) -> Result<Self> {
        reqwest::Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid content root URL '{base}': {e}")))?;

        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self { base, client })
    }

    fn url_for(&self, section: Section) -> String {
        format!("{}{}", self.base, section.file_name())
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn location(&self, section: Section) -> String {
        self.url_for(section)
    }

    async fn fetch(&self, section: Section) -> Result<Value> {
        let url = self.url_for(section);
        log::debug!("Fetching baseline {section} from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::load(section, format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unexpected status");
            return Err(Error::load(
                section,
                format!("Failed to fetch {url}: {} {reason}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::load(section, format!("Failed to read {url}: {e}")))?;

        parse_body(section, &url, &body)
    }
}
