use std::time::Duration;

use mytrip_tourapi::config::{DEFAULT_BASE_URL, DEFAULT_MOBILE_APP};
use mytrip_tourapi::retry::RetryPolicy;
use mytrip_tourapi::TourApiConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public origin used in `robots.txt` and `sitemap.xml`.
    pub site_url: String,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Upstream tourism API connection settings.
    pub tour_api: TourApiConfig,
    /// How long listing and detail responses are reused.
    pub list_cache_ttl: Duration,
    /// How long aggregated statistics are reused.
    pub stats_cache_ttl: Duration,
    /// Retry policy for each statistics count query.
    pub stats_retry: RetryPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `3000`                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `SITE_URL`             | `https://example.com`                         |
    /// | `TOUR_API_BASE_URL`    | `https://apis.data.go.kr/B551011/KorService2` |
    /// | `TOUR_API_KEY`         | unset (place endpoints answer 503)            |
    /// | `TOUR_PET_API_KEY`     | falls back to `TOUR_API_KEY`                  |
    /// | `TOUR_API_MOBILE_APP`  | `MyTrip`                                      |
    /// | `LIST_CACHE_TTL_SECS`  | `60`                                          |
    /// | `STATS_CACHE_TTL_SECS` | `3600`                                        |
    /// | `STATS_MAX_RETRIES`    | `3`                                           |
    /// | `STATS_RETRY_DELAY_MS` | `1000`                                        |
    ///
    /// `JWT_SECRET` is required; see [`JwtConfig::from_lookup`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from any source.
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse or `JWT_SECRET` is
    /// missing. Misconfiguration should stop the process at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let site_url = var("SITE_URL", "https://example.com")
            .trim_end_matches('/')
            .to_string();

        let tour_api = TourApiConfig::new(
            var("TOUR_API_BASE_URL", DEFAULT_BASE_URL),
            lookup("TOUR_API_KEY"),
        )
        .with_pet_service_key(lookup("TOUR_PET_API_KEY"))
        .with_mobile_app(var("TOUR_API_MOBILE_APP", DEFAULT_MOBILE_APP));

        let list_cache_secs: u64 = var("LIST_CACHE_TTL_SECS", "60")
            .parse()
            .expect("LIST_CACHE_TTL_SECS must be a valid u64");

        let stats_cache_secs: u64 = var("STATS_CACHE_TTL_SECS", "3600")
            .parse()
            .expect("STATS_CACHE_TTL_SECS must be a valid u64");

        let max_retries: u32 = var("STATS_MAX_RETRIES", "3")
            .parse()
            .expect("STATS_MAX_RETRIES must be a valid u32");

        let retry_delay_ms: u64 = var("STATS_RETRY_DELAY_MS", "1000")
            .parse()
            .expect("STATS_RETRY_DELAY_MS must be a valid u64");

        let jwt = JwtConfig::from_lookup(&lookup);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            site_url,
            jwt,
            tour_api,
            list_cache_ttl: Duration::from_secs(list_cache_secs),
            stats_cache_ttl: Duration::from_secs(stats_cache_secs),
            stats_retry: RetryPolicy {
                max_retries,
                delay: Duration::from_millis(retry_delay_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s")]));

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.tour_api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tour_api.mobile_app, "MyTrip");
        assert_eq!(config.tour_api.service_key(), None);
        assert_eq!(config.list_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.stats_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.stats_retry, RetryPolicy::default());
    }

    #[test]
    fn overrides_are_read() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("SITE_URL", "https://mytrip.example/"),
            ("TOUR_API_KEY", "key"),
            ("TOUR_PET_API_KEY", "pet"),
            ("STATS_MAX_RETRIES", "1"),
            ("STATS_RETRY_DELAY_MS", "5"),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.site_url, "https://mytrip.example");
        assert_eq!(config.tour_api.service_key(), Some("key"));
        assert_eq!(config.tour_api.pet_service_key(), Some("pet"));
        assert_eq!(config.stats_retry.max_retries, 1);
        assert_eq!(config.stats_retry.delay, Duration::from_millis(5));
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn invalid_port_panics() {
        ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("PORT", "abc")]));
    }
}
