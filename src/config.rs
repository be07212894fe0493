//! Service configuration from environment variables

use crate::fetcher::NumberSource;
use crate::window::WINDOW_SIZE;
use std::env;
use std::str::FromStr;

pub const DEFAULT_PRIME_URL: &str = "https://prime-numbers-api.com/api/v1/primes?limit={}";
pub const DEFAULT_FIBONACCI_URL: &str = "https://fibonacci-api.com/api/v1/fibonacci?limit={}";
pub const DEFAULT_EVEN_URL: &str = "https://api.math.tools/numbers/even?limit={}";
pub const DEFAULT_RANDOM_URL: &str =
    "https://www.random.org/integers/?num={}&min=1&max=100&col=1&base=10&format=plain&rnd=new";

/// Configuration for the numflow server
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,

    /// Window capacity
    pub window_size: usize,

    /// Total upstream budget per request, all attempts included
    pub upstream_timeout_ms: u64,

    pub upstream_max_retries: u32,
    pub upstream_backoff_ms: u64,
    pub upstream_backoff_max_ms: u64,

    /// Substituted for `{}` in the URL templates
    pub upstream_limit: usize,

    pub prime_url: String,
    pub fibonacci_url: String,
    pub even_url: String,
    pub random_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9876".to_string(),
            window_size: WINDOW_SIZE,
            upstream_timeout_ms: 500,
            upstream_max_retries: 1,
            upstream_backoff_ms: 50,
            upstream_backoff_max_ms: 200,
            upstream_limit: WINDOW_SIZE,
            prime_url: DEFAULT_PRIME_URL.to_string(),
            fibonacci_url: DEFAULT_FIBONACCI_URL.to_string(),
            even_url: DEFAULT_EVEN_URL.to_string(),
            random_url: DEFAULT_RANDOM_URL.to_string(),
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NUMFLOW_BIND_ADDR` (default: 0.0.0.0:9876)
    /// - `WINDOW_SIZE` (default: 10, must be positive)
    /// - `UPSTREAM_TIMEOUT_MS` (default: 500)
    /// - `UPSTREAM_MAX_RETRIES` (default: 1)
    /// - `UPSTREAM_BACKOFF_MS` (default: 50)
    /// - `UPSTREAM_BACKOFF_MAX_MS` (default: 200)
    /// - `UPSTREAM_LIMIT` (default: window size)
    /// - `PRIME_API_URL`, `FIBONACCI_API_URL`, `EVEN_API_URL`, `RANDOM_API_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let window_size = match parsed::<usize>("WINDOW_SIZE") {
            Some(0) => {
                log::warn!("WINDOW_SIZE must be positive, using {}", defaults.window_size);
                defaults.window_size
            }
            Some(n) => n,
            None => defaults.window_size,
        };

        Self {
            bind_addr: env::var("NUMFLOW_BIND_ADDR").unwrap_or(defaults.bind_addr),

            window_size,

            upstream_timeout_ms: parsed::<u64>("UPSTREAM_TIMEOUT_MS")
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.upstream_timeout_ms),

            upstream_max_retries: parsed("UPSTREAM_MAX_RETRIES")
                .unwrap_or(defaults.upstream_max_retries),

            upstream_backoff_ms: parsed("UPSTREAM_BACKOFF_MS").unwrap_or(defaults.upstream_backoff_ms),

            upstream_backoff_max_ms: parsed("UPSTREAM_BACKOFF_MAX_MS")
                .unwrap_or(defaults.upstream_backoff_max_ms),

            upstream_limit: parsed::<usize>("UPSTREAM_LIMIT")
                .filter(|&n| n > 0)
                .unwrap_or(window_size),

            prime_url: env::var("PRIME_API_URL").unwrap_or(defaults.prime_url),
            fibonacci_url: env::var("FIBONACCI_API_URL").unwrap_or(defaults.fibonacci_url),
            even_url: env::var("EVEN_API_URL").unwrap_or(defaults.even_url),
            random_url: env::var("RANDOM_API_URL").unwrap_or(defaults.random_url),
        }
    }

    pub fn url_template(&self, source: NumberSource) -> &str {
        match source {
            NumberSource::Prime => &self.prime_url,
            NumberSource::Fibonacci => &self.fibonacci_url,
            NumberSource::Even => &self.even_url,
            NumberSource::Random => &self.random_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 5] = [
        "NUMFLOW_BIND_ADDR",
        "WINDOW_SIZE",
        "UPSTREAM_TIMEOUT_MS",
        "UPSTREAM_LIMIT",
        "PRIME_API_URL",
    ];

    // Single test so no other test races on the same variables
    #[test]
    fn test_config_from_env() {
        for key in KEYS {
            env::remove_var(key);
        }

        let config = ServiceConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:9876");
        assert_eq!(config.window_size, 10);
        assert_eq!(config.upstream_timeout_ms, 500);
        assert_eq!(config.upstream_limit, 10);
        assert_eq!(config.url_template(NumberSource::Prime), DEFAULT_PRIME_URL);

        env::set_var("NUMFLOW_BIND_ADDR", "127.0.0.1:8080");
        env::set_var("WINDOW_SIZE", "25");
        env::set_var("UPSTREAM_TIMEOUT_MS", "not-a-number");
        env::set_var("PRIME_API_URL", "http://localhost:1/primes?n={}");

        let config = ServiceConfig::from_env();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.window_size, 25);
        assert_eq!(config.upstream_timeout_ms, 500);
        // Limit follows the window size unless set
        assert_eq!(config.upstream_limit, 25);
        assert_eq!(config.url_template(NumberSource::Prime), "http://localhost:1/primes?n={}");

        env::set_var("WINDOW_SIZE", "0");
        env::set_var("UPSTREAM_LIMIT", "3");
        let config = ServiceConfig::from_env();
        assert_eq!(config.window_size, 10);
        assert_eq!(config.upstream_limit, 3);

        for key in KEYS {
            env::remove_var(key);
        }
    }
}
