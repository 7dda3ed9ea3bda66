//! Best-effort public-address lookup for suggestion metadata.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default "what is my address" service.
pub const DEFAULT_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    ip: String,
}

/// Client for a third-party address lookup service.
///
/// Failures are swallowed: a suggestion is submitted without the address
/// field rather than blocked on this lookup.
pub struct AddressLookup {
    http: Client,
    url: String,
}

impl AddressLookup {
    pub fn new(url: impl Into<String>) -> crate::Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn default_service() -> crate::Result<Self> {
        Self::new(DEFAULT_LOOKUP_URL)
    }

    /// The submitter's public address, or `None` when the lookup fails in
    /// any way.
    pub async fn public_address(&self) -> Option<String> {
        let response = match self.http.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "Address lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "Address lookup failed");
            return None;
        }

        match response.json::<AddressResponse>().await {
            Ok(body) => Some(body.ip),
            Err(e) => {
                debug!(error = %e, "Address lookup returned unparseable body");
                None
            }
        }
    }
}
