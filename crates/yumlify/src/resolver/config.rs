//! Resolver configuration
//!
//! Defaults match the public yUML service. Every value can be overridden
//! through `YUMLIFY_*` environment variables; absent or unparsable values
//! fall back to the default.

use std::time::Duration;

/// Base endpoint the style fragment and `/class/` are appended to
pub const DEFAULT_ENDPOINT: &str = "https://yuml.me/diagram";

/// Host prefixed to the identifier returned by the service
pub const DEFAULT_IMAGE_HOST: &str = "https://yuml.me/";

/// Lifetime of a cached fragment-to-URL entry
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30_000);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`super::DiagramUriResolver`] and [`super::YumlClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub endpoint: String,
    pub image_host: String,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Read `YUMLIFY_ENDPOINT`, `YUMLIFY_IMAGE_HOST`, `YUMLIFY_CACHE_TTL_SECS`
    /// and `YUMLIFY_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seconds = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        Self {
            endpoint: lookup("YUMLIFY_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.endpoint),
            image_host: lookup("YUMLIFY_IMAGE_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.image_host),
            cache_ttl: seconds("YUMLIFY_CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            timeout: seconds("YUMLIFY_TIMEOUT_SECS").unwrap_or(defaults.timeout),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_image_host(mut self, image_host: impl Into<String>) -> Self {
        self.image_host = image_host.into();
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.endpoint, "https://yuml.me/diagram");
        assert_eq!(config.cache_ttl, Duration::from_secs(30_000));
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("YUMLIFY_ENDPOINT", "http://localhost:8080/diagram"),
            ("YUMLIFY_CACHE_TTL_SECS", "60"),
        ]
        .into_iter()
        .collect();
        let config = ResolverConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoint, "http://localhost:8080/diagram");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.image_host, DEFAULT_IMAGE_HOST);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ResolverConfig::default()
            .with_endpoint("http://localhost:8080/diagram")
            .with_image_host("http://localhost:8080/")
            .with_cache_ttl(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:8080/diagram");
        assert_eq!(config.image_host, "http://localhost:8080/");
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = ResolverConfig::from_lookup(|key| match key {
            "YUMLIFY_TIMEOUT_SECS" => Some("soon".to_string()),
            "YUMLIFY_IMAGE_HOST" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config, ResolverConfig::default());
    }
}
