//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binaries before [`AppConfig::from_env`] is called.

use std::env;
use std::path::PathBuf;

use crate::error::AgentError;
use crate::Result;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_LIMINAL_BASE_URL: &str = "https://api.liminal.cash";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TRANSACTIONS_CSV: &str = "transactions.csv";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub anthropic_api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub liminal_base_url: String,
    pub port: u16,
    pub transactions_csv: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let anthropic_api_key = get("ANTHROPIC_API_KEY").ok_or_else(|| {
            AgentError::ConfigError("ANTHROPIC_API_KEY environment variable is required".to_string())
        })?;

        let max_tokens = match get("ANTHROPIC_MAX_TOKENS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AgentError::ConfigError(format!("ANTHROPIC_MAX_TOKENS is not a number: {}", raw))
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AgentError::ConfigError(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            anthropic_api_key,
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            liminal_base_url: get("LIMINAL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LIMINAL_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port,
            transactions_csv: get("TRANSACTIONS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSACTIONS_CSV)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.liminal_base_url, "https://api.liminal.cash");
        assert_eq!(config.port, 8080);
        assert_eq!(config.transactions_csv, PathBuf::from("transactions.csv"));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, AgentError::ConfigError(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("LIMINAL_BASE_URL", "http://localhost:9000/"),
            ("API_PORT", "3001"),
            ("TRANSACTIONS_CSV", "fixtures/demo.csv"),
        ]))
        .unwrap();

        assert_eq!(config.liminal_base_url, "http://localhost:9000");
        assert_eq!(config.port, 3001);
        assert_eq!(config.transactions_csv, PathBuf::from("fixtures/demo.csv"));
    }

    #[test]
    fn test_bad_port() {
        let result = AppConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
