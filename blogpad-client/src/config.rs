use crate::endpoints;
use crate::error::ConfigError;

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub version: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::BASE_URL.to_string(),
            version: endpoints::VERSION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BLOGPAD_API_URL") {
            config.base_url = url;
        }
        if let Some(version) = lookup("BLOGPAD_API_VERSION") {
            config.version = version;
        }
        if let Some(raw) = lookup("BLOGPAD_PAGE_SIZE") {
            config.page_size = match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "BLOGPAD_PAGE_SIZE",
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup("BLOGPAD_TIMEOUT_SECS") {
            config.timeout_secs =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: "BLOGPAD_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
        }

        tracing::debug!(
            "Client config: base_url={}, version={}, page_size={}",
            config.base_url,
            config.version,
            config.page_size
        );
        Ok(config)
    }

    pub fn api_root(&self) -> String {
        endpoints::api_root(&self.base_url, &self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_root(), "http://localhost:5016/v1");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BLOGPAD_API_URL", "https://blog.example.com"),
            ("BLOGPAD_API_VERSION", "v2"),
            ("BLOGPAD_PAGE_SIZE", "20"),
        ]))
        .unwrap();

        assert_eq!(config.api_root(), "https://blog.example.com/v2");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = ClientConfig::from_lookup(lookup_from(&[("BLOGPAD_PAGE_SIZE", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("BLOGPAD_PAGE_SIZE"));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("BLOGPAD_TIMEOUT_SECS", "soon")])).is_err()
        );
    }
}
