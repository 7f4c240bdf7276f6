//! # Remote Catalog Client
//!
//! Thin client over the remote product API. No retries, no caching: the data
//! is read-only and low-stakes, so every call is a fresh round trip and
//! failures surface to the consumer for a manual retry.

use reqwest::{Client, Response, StatusCode};

use crate::{catalog::Product, error::RemoteError};

pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Fetches the full product collection, in the order the remote serves it.
    pub async fn fetch_all(&self) -> Result<Vec<Product>, RemoteError> {
        let response = self.get("products").await?;
        let response = check_status(response)?;

        Ok(response.json().await?)
    }

    /// Fetches a single product. A remote 404 keeps its status so the
    /// consumer can map it to a not-found state, see
    /// [`RemoteError::is_not_found`].
    pub async fn fetch_by_id(&self, id: u64) -> Result<Product, RemoteError> {
        let response = self.get(&format!("products/{id}")).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RemoteError::Http {
                status: 404,
                message: "Product not found".to_string(),
            });
        }
        let response = check_status(response)?;

        Ok(response.json().await?)
    }

    /// Fetches the category strings the remote knows about.
    pub async fn fetch_categories(&self) -> Result<Vec<String>, RemoteError> {
        let response = self.get("products/categories").await?;
        let response = check_status(response)?;

        Ok(response.json().await?)
    }

    async fn get(&self, path: &str) -> Result<Response, RemoteError> {
        let url = format!("{}/{path}", self.base_url);

        self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!("Request to {url} failed: {e}");
            e.into()
        })
    }
}

fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();

    if !status.is_success() {
        return Err(RemoteError::Http {
            status: status.as_u16(),
            message: format!(
                "Failed to fetch: {}",
                status.canonical_reason().unwrap_or("unknown status")
            ),
        });
    }

    Ok(response)
}

/// Guard against late results from superseded fetches.
///
/// A view takes a token before issuing a fetch and bumps the epoch on
/// teardown; a result whose token is no longer current gets dropped instead
/// of overwriting state that no longer has a consumer.
#[derive(Debug, Default)]
pub struct FetchEpoch {
    current: u64,
}

impl FetchEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.current == token
    }

    pub fn bump(&mut self) {
        self.current += 1;
    }
}
