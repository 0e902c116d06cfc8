//! Remote catalog client.

use super::error::CatalogError;
use super::types::{Catalog, CatalogDocument};

/// Configuration for the remote catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// URL of the catalog JSON document
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogClientConfig {
    /// Create a new config for the given document URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Fetches the catalog document over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    url: String,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the catalog.
    pub async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let doc: CatalogDocument = serde_json::from_str(&body).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;

        Catalog::from_document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CatalogClientConfig::new("http://localhost:8080/travelData.json");
        assert_eq!(config.url, "http://localhost:8080/travelData.json");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = CatalogClientConfig::new("http://localhost").with_timeout_secs(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_keeps_url() {
        let client = CatalogClient::new(CatalogClientConfig::new("http://localhost/c.json")).unwrap();
        assert_eq!(client.url(), "http://localhost/c.json");
    }
}
