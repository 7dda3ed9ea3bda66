//! Single-document JSON blob store client.

use crate::error::{RemoteStoreError, Result};
use condo_core::Snapshot;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for a jsonblob-style document store.
///
/// The base URL is the collection endpoint; documents live at
/// `{base_url}/{id}`. All three operations move the whole snapshot; the
/// store has no partial update protocol.
pub struct DocumentClient {
    http: Client,
    base_url: String,
}

impl DocumentClient {
    /// Create a new client for the given collection endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(RemoteStoreError::InvalidUrl("URL cannot be empty".into()));
        }

        // Normalize: document paths are appended to the base URL
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(RemoteStoreError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("CondoControl/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the collection endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a new document holding `snapshot`.
    ///
    /// The store assigns the id and conveys it via the `Location` response
    /// header. No id may be assumed minted when this fails.
    pub async fn create(&self, snapshot: &Snapshot) -> Result<String> {
        debug!(url = %self.base_url, "Creating remote document");

        let response = self
            .http
            .post(&self.base_url)
            .json(snapshot)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Store rejected document creation");
            return Err(RemoteStoreError::RemoteUnavailable(format!(
                "create returned status {status}"
            )));
        }

        let id = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| location.rsplit('/').find(|s| !s.is_empty()))
            .map(str::to_string)
            .ok_or_else(|| {
                RemoteStoreError::Parse("create response carried no document id".into())
            })?;

        debug!(id = %id, "Remote document created");
        Ok(id)
    }

    /// Fetch the document with the given id.
    pub async fn fetch(&self, id: &str) -> Result<Snapshot> {
        let url = format!("{}/{}", self.base_url, id);
        debug!(url = %url, "Fetching remote document");

        let response = self.http.get(&url).send().await.map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            // Unknown and expired ids are indistinguishable here; any
            // non-2xx means the id does not resolve to a document.
            return Err(RemoteStoreError::NotFound(id.to_string()));
        }

        let snapshot: Snapshot = response.json().await.map_err(|e| {
            RemoteStoreError::Parse(format!("failed to parse stored document: {e}"))
        })?;

        debug!(
            payments = snapshot.payments.len(),
            expenses = snapshot.expenses.len(),
            suggestions = snapshot.suggestions.len(),
            "Fetched remote document"
        );
        Ok(snapshot)
    }

    /// Overwrite the document unconditionally (last-write-wins; no version
    /// token, no conflict detection).
    pub async fn replace(&self, id: &str, snapshot: &Snapshot) -> Result<()> {
        let url = format!("{}/{}", self.base_url, id);
        debug!(url = %url, "Replacing remote document");

        let response = self
            .http
            .put(&url)
            .json(snapshot)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Store rejected document replace");
            return Err(RemoteStoreError::RemoteUnavailable(format!(
                "replace returned status {status}"
            )));
        }

        Ok(())
    }
}

fn unavailable(e: reqwest::Error) -> RemoteStoreError {
    RemoteStoreError::RemoteUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(DocumentClient::new("https://jsonblob.com/api/jsonBlob").is_ok());
        assert!(DocumentClient::new("http://localhost:8080").is_ok());

        assert!(matches!(
            DocumentClient::new(""),
            Err(RemoteStoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            DocumentClient::new("not-a-url"),
            Err(RemoteStoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            DocumentClient::new("ftp://example.com"),
            Err(RemoteStoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn url_normalization_strips_trailing_slashes() {
        let client = DocumentClient::new("https://example.com/api/jsonBlob///").unwrap();
        assert_eq!(client.base_url(), "https://example.com/api/jsonBlob");
    }
}
