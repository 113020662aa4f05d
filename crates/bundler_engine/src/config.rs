use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_NOISE_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Knobs recognised by the pipeline. Every field falls back to its default
/// when missing from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    pub timeout_seconds: u64,
    pub concurrency_limit: usize,
    pub user_agent: String,
    pub noise_tags: Vec<String>,
    pub max_bytes: u64,
    pub redirect_limit: usize,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            concurrency_limit: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            noise_tags: DEFAULT_NOISE_TAGS.iter().map(|t| t.to_string()).collect(),
            max_bytes: 10 * 1024 * 1024,
            redirect_limit: 10,
        }
    }
}

impl BundlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Concurrency limit clamped so a zero in a config file cannot stall a run.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency_limit.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BundlerConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.effective_concurrency(), 5);
        assert_eq!(
            config.noise_tags,
            vec!["script", "style", "nav", "footer", "header"]
        );
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let config = BundlerConfig {
            concurrency_limit: 0,
            ..BundlerConfig::default()
        };
        assert_eq!(config.effective_concurrency(), 1);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: BundlerConfig = serde_json::from_str(r#"{"concurrency_limit": 2}"#).unwrap();
        assert_eq!(config.concurrency_limit, 2);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.redirect_limit, 10);
    }
}
