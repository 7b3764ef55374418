use std::time::Duration;

/// Dashboard auto-refresh period.
pub const PRICE_POLL_INTERVAL: Duration = Duration::from_secs(600);

const DEFAULT_BASE_URL: &str = "http://api.sribullion.in";
const API_PATH: &str = "/RestApi/restApiPHP.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Built-in endpoint and timing configuration.
///
/// The backend is a single legacy PHP entry point and every operation is
/// selected through the `option` query parameter, so only the host varies
/// between deployments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub api_path: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn builtin() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url<T: Into<String>>(base_url: T) -> Self {
        Self {
            base_url: base_url.into(),
            api_path: API_PATH.to_string(),
            poll_interval: PRICE_POLL_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Full URL of the PHP entry point, tolerant of a trailing slash on the host.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.api_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_host_and_path() {
        let config = AppConfig::with_base_url("http://example.test");
        assert_eq!(
            config.endpoint_url(),
            "http://example.test/RestApi/restApiPHP.php"
        );
    }

    #[test]
    fn endpoint_url_drops_trailing_slash() {
        let config = AppConfig::with_base_url("http://example.test/");
        assert_eq!(
            config.endpoint_url(),
            "http://example.test/RestApi/restApiPHP.php"
        );
    }

    #[test]
    fn builtin_polls_every_ten_minutes() {
        assert_eq!(AppConfig::builtin().poll_interval, Duration::from_secs(600));
    }
}
