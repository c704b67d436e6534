//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// Parameters for one limiter policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicyConfig {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Maximum requests per window
    pub max_requests: u32,
}

/// Rate limiting configuration.
///
/// The broad `api` limiter and the strict `leaderboard` limiter share one
/// mechanism; only the parameters differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Broad limiter for all API traffic
    #[serde(default = "default_api_policy")]
    pub api: RateLimitPolicyConfig,
    /// Strict limiter for the leaderboard aggregate
    #[serde(default = "default_leaderboard_policy")]
    pub leaderboard: RateLimitPolicyConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            api: default_api_policy(),
            leaderboard: default_leaderboard_policy(),
        }
    }
}

/// 15 minutes, 100 requests
pub fn default_api_policy() -> RateLimitPolicyConfig {
    RateLimitPolicyConfig {
        window_ms: 900_000,
        max_requests: 100,
    }
}

/// 1 minute, 10 requests
pub fn default_leaderboard_policy() -> RateLimitPolicyConfig {
    RateLimitPolicyConfig {
        window_ms: 60_000,
        max_requests: 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.api.window_ms, 900_000);
        assert_eq!(config.api.max_requests, 100);
        assert_eq!(config.leaderboard.window_ms, 60_000);
        assert_eq!(config.leaderboard.max_requests, 10);
    }

    #[test]
    fn test_rate_limit_config_deserialization_defaults() {
        let config: RateLimitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api, default_api_policy());
        assert_eq!(config.leaderboard, default_leaderboard_policy());
    }

    #[test]
    fn test_rate_limit_config_partial_override() {
        let json = r#"{"leaderboard": {"window_ms": 30000, "max_requests": 5}}"#;
        let config: RateLimitConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api, default_api_policy());
        assert_eq!(config.leaderboard.window_ms, 30_000);
        assert_eq!(config.leaderboard.max_requests, 5);
    }

    #[test]
    fn test_policy_requires_both_fields() {
        let result: Result<RateLimitPolicyConfig, _> = serde_json::from_str(r#"{"window_ms": 1000}"#);
        assert!(result.is_err());
    }
}
