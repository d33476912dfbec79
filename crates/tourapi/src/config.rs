/// Production endpoint of the domestic tourism service, version 2.
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/B551011/KorService2";

/// Application name reported in every request.
pub const DEFAULT_MOBILE_APP: &str = "MyTrip";

/// Platform reported in every request.
pub const MOBILE_OS: &str = "ETC";

/// Connection settings for [`TourApiClient`](crate::TourApiClient).
#[derive(Debug, Clone)]
pub struct TourApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Data portal service key. `None` leaves the client unconfigured:
    /// every call fails with `MissingServiceKey`.
    pub service_key: Option<String>,
    /// Separate key for the pet-travel endpoint; falls back to
    /// `service_key`.
    pub pet_service_key: Option<String>,
    pub mobile_app: String,
}

impl Default for TourApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            service_key: None,
            pet_service_key: None,
            mobile_app: DEFAULT_MOBILE_APP.to_string(),
        }
    }
}

impl TourApiConfig {
    /// Config pointing at `base_url` with the given key.
    pub fn new(base_url: impl Into<String>, service_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: clean_key(service_key),
            ..Self::default()
        }
    }

    pub fn with_pet_service_key(mut self, key: Option<String>) -> Self {
        self.pet_service_key = clean_key(key);
        self
    }

    pub fn with_mobile_app(mut self, mobile_app: impl Into<String>) -> Self {
        self.mobile_app = mobile_app.into();
        self
    }

    pub fn service_key(&self) -> Option<&str> {
        self.service_key.as_deref()
    }

    /// Key used for `detailPetTour2`.
    pub fn pet_service_key(&self) -> Option<&str> {
        self.pet_service_key.as_deref().or(self.service_key())
    }
}

/// Trim a key and treat a blank one as absent.
fn clean_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_absent() {
        let config = TourApiConfig::new(DEFAULT_BASE_URL, Some("   ".into()));
        assert_eq!(config.service_key(), None);
    }

    #[test]
    fn keys_are_trimmed() {
        let config = TourApiConfig::new(DEFAULT_BASE_URL, Some(" abc \n".into()));
        assert_eq!(config.service_key(), Some("abc"));
    }

    #[test]
    fn pet_key_falls_back_to_service_key() {
        let config = TourApiConfig::new(DEFAULT_BASE_URL, Some("main".into()));
        assert_eq!(config.pet_service_key(), Some("main"));

        let config = config.with_pet_service_key(Some("pet".into()));
        assert_eq!(config.pet_service_key(), Some("pet"));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = TourApiConfig::new("http://localhost:9000/", None);
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
