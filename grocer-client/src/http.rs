//! HTTP document source

use crate::{ClientConfig, ClientError, ClientResult, DocumentSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for fetching catalog documents
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a document path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url_for(path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        Self::handle_response(response, &url).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(url.to_string())),
                _ => Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

#[async_trait]
impl DocumentSource for HttpClient {
    async fn fetch(&self, path: &str) -> ClientResult<Value> {
        self.get(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_single_slash() {
        let client = ClientConfig::new("http://localhost:4200/")
            .build_http_client()
            .unwrap();
        assert_eq!(
            client.url_for("/data-3/fruit.json"),
            "http://localhost:4200/data-3/fruit.json"
        );
    }
}
