use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://dynv6.com/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            api_url: env::var("DYNV6_API_URL")
                .map(|url| normalize_api_url(&url))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                env::var("DYNV6_TIMEOUT")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_api_url(api_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_dynv6() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://dynv6.com/api/v2");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_with_api_url_trims_trailing_slash() {
        let config = Config::default().with_api_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
    }
}
