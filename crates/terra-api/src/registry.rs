// Country registry HTTP client
//
// Read-only wrapper over restcountries.com v3.1. The registry answers
// "no match" with HTTP 404, which this client turns into an empty list;
// every other non-success status is an `Error::Registry`.

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{RawCountry, decode_countries};
use crate::transport::{TransportConfig, join_segments};

/// Async client for the public country registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    /// Create a client from a base URL (e.g. `https://restcountries.com/v3.1`)
    /// and a transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The registry base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /all`: the full collection.
    pub async fn list_all(&self) -> Result<Vec<RawCountry>, Error> {
        self.get_countries(&["all"]).await
    }

    /// `GET /name/{query}`: partial name match.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<RawCountry>, Error> {
        self.get_countries(&["name", query]).await
    }

    /// `GET /region/{region}`: every country of one region.
    pub async fn filter_by_region(&self, region: &str) -> Result<Vec<RawCountry>, Error> {
        self.get_countries(&["region", region]).await
    }

    /// `GET /alpha/{code}`: single lookup by ISO code.
    ///
    /// The registry wraps the match in an array; returns the first element,
    /// or `None` when nothing matched.
    pub async fn by_code(&self, code: &str) -> Result<Option<RawCountry>, Error> {
        let mut found = self.get_countries(&["alpha", code]).await?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.swap_remove(0)))
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_countries(&self, segments: &[&str]) -> Result<Vec<RawCountry>, Error> {
        let url = join_segments(&self.base_url, segments)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            trace!("registry returned 404, treating as empty result");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Registry {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await?;
        let countries = decode_countries(&body)?;
        debug!(count = countries.len(), "registry response decoded");
        Ok(countries)
    }
}
