//! Upstream service configuration

use serde::{Deserialize, Serialize};

use super::{default_upstream_base_url, default_upstream_timeout};

/// Configuration for the CatBreeds service the gateway fronts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream service
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout: default_upstream_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_config_default() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, 10);
    }

    #[test]
    fn test_upstream_config_deserialization() {
        let json = r#"{"base_url": "https://api.catbreeds.example", "timeout": 3}"#;
        let config: UpstreamConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://api.catbreeds.example");
        assert_eq!(config.timeout, 3);
    }
}
