//! Backend settings read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};

pub const URL_VAR: &str = "GRADE_TRACKER_URL";
pub const API_KEY_VAR: &str = "GRADE_TRACKER_API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "GRADE_TRACKER_ACCESS_TOKEN";
pub const USER_ID_VAR: &str = "GRADE_TRACKER_USER_ID";

/// Connection settings for the hosted REST backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub access_token: String,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{name} must be set"))
        };

        Ok(Self {
            base_url: require(URL_VAR)?.trim_end_matches('/').to_string(),
            api_key: require(API_KEY_VAR)?,
            access_token: require(ACCESS_TOKEN_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let env = vars(&[
            (URL_VAR, "https://example.test/"),
            (API_KEY_VAR, "anon"),
            (ACCESS_TOKEN_VAR, "jwt"),
        ]);
        let config = BackendConfig::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.access_token, "jwt");
    }

    #[test]
    fn test_from_lookup_names_missing_var() {
        let env = vars(&[(URL_VAR, "https://example.test"), (API_KEY_VAR, " ")]);
        let err = BackendConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "GRADE_TRACKER_API_KEY must be set");
    }
}
