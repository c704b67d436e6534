//! JSON client for the upstream CatBreeds service
//!
//! The gateway never owns breed or like data; it fronts the CatBreeds app
//! and fills cache misses through this client.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::utils::error::{GatewayError, Result};

/// Thin JSON client for the service the gateway fronts
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching upstream {}", url);
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_json_with(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching upstream {}", url);
        let response = self.http.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    /// POST `body` to `path` and decode the JSON reply
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Posting upstream {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(
                "upstream resource not found".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(GatewayError::Upstream(format!(
                "upstream responded with {status}"
            )));
        }
        Ok(response.json().await?)
    }
}
