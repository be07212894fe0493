//! Fetcher - number sources behind a swappable capability
//!
//! The window only ever sees a plain `Vec<i64>`. Everything that can go
//! wrong upstream (transport errors, bad status, malformed body, timeout)
//! is logged here and collapsed into an empty candidate list by
//! [`fetch_or_empty`].

pub mod backoff;
pub mod error;
pub mod fixed;
pub mod http;

use async_trait::async_trait;
use std::time::Duration;

pub use backoff::{ExponentialBackoff, MaxRetriesExceeded};
pub use error::FetchError;
pub use fixed::FixedFetcher;
pub use http::{parse_numbers, HttpNumberFetcher};

/// Number classification selected by the single-character path identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberSource {
    Prime,
    Fibonacci,
    Even,
    Random,
}

impl NumberSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberSource::Prime => "p",
            NumberSource::Fibonacci => "f",
            NumberSource::Even => "e",
            NumberSource::Random => "r",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s {
            "p" => Some(NumberSource::Prime),
            "f" => Some(NumberSource::Fibonacci),
            "e" => Some(NumberSource::Even),
            "r" => Some(NumberSource::Random),
            _ => None,
        }
    }

    pub fn all() -> [NumberSource; 4] {
        [
            NumberSource::Prime,
            NumberSource::Fibonacci,
            NumberSource::Even,
            NumberSource::Random,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            NumberSource::Prime => "primes",
            NumberSource::Fibonacci => "fibonacci",
            NumberSource::Even => "even",
            NumberSource::Random => "random",
        }
    }
}

/// Produces the ordered numbers for one source
#[async_trait]
pub trait NumberFetcher: Send + Sync {
    async fn fetch(&self, source: NumberSource) -> Result<Vec<i64>, FetchError>;

    /// Fetcher kind for logging
    fn fetcher_type(&self) -> &'static str;
}

/// What happened at the fetch boundary
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<i64>),
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn into_numbers(self) -> Vec<i64> {
        match self {
            FetchOutcome::Fetched(numbers) => numbers,
            FetchOutcome::Empty | FetchOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Fetch under a total time budget; never returns an error
pub async fn fetch_or_empty(
    fetcher: &dyn NumberFetcher,
    source: NumberSource,
    budget: Duration,
) -> FetchOutcome {
    let started = std::time::Instant::now();
    let budget_ms = budget.as_millis() as u64;

    let result = match tokio::time::timeout(budget, fetcher.fetch(source)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(budget_ms)),
    };

    match result {
        Ok(numbers) if numbers.is_empty() => {
            log::info!(
                "Upstream {} ({}) returned no numbers in {}ms",
                source.label(),
                fetcher.fetcher_type(),
                started.elapsed().as_millis()
            );
            FetchOutcome::Empty
        }
        Ok(numbers) => {
            log::debug!(
                "Fetched {} numbers from {} ({}) in {}ms",
                numbers.len(),
                source.label(),
                fetcher.fetcher_type(),
                started.elapsed().as_millis()
            );
            FetchOutcome::Fetched(numbers)
        }
        Err(e) => {
            log::warn!(
                "⚠️  Upstream {} ({}) failed, using empty result: {}",
                source.label(),
                fetcher.fetcher_type(),
                e
            );
            FetchOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowFetcher;

    #[async_trait]
    impl NumberFetcher for SlowFetcher {
        async fn fetch(&self, _source: NumberSource) -> Result<Vec<i64>, FetchError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![1, 2, 3])
        }

        fn fetcher_type(&self) -> &'static str {
            "slow"
        }
    }

    #[test]
    fn test_source_ids() {
        for source in NumberSource::all() {
            assert_eq!(NumberSource::from_id(source.as_str()), Some(source));
        }
        assert_eq!(NumberSource::from_id("x"), None);
        assert_eq!(NumberSource::from_id("P"), None);
        assert_eq!(NumberSource::from_id("pp"), None);
        assert_eq!(NumberSource::from_id(""), None);
    }

    #[tokio::test]
    async fn test_timeout_collapses_to_empty() {
        let outcome = fetch_or_empty(&SlowFetcher, NumberSource::Prime, Duration::from_millis(20)).await;
        assert!(matches!(outcome, FetchOutcome::Failed(FetchError::Timeout(20))));
        assert!(outcome.into_numbers().is_empty());
    }

    #[tokio::test]
    async fn test_failure_distinguished_from_empty() {
        let failing = FixedFetcher::failing();
        let outcome = fetch_or_empty(&failing, NumberSource::Even, Duration::from_millis(500)).await;
        assert!(outcome.is_failure());

        let empty = FixedFetcher::new();
        let outcome = fetch_or_empty(&empty, NumberSource::Even, Duration::from_millis(500)).await;
        assert!(matches!(outcome, FetchOutcome::Empty));
        assert!(!outcome.is_failure());
    }

    #[tokio::test]
    async fn test_fetched_numbers_pass_through_in_order() {
        let fetcher = FixedFetcher::new().with(NumberSource::Fibonacci, vec![1, 1, 2, 3, 5]);
        let outcome = fetch_or_empty(&fetcher, NumberSource::Fibonacci, Duration::from_millis(500)).await;
        assert_eq!(outcome.into_numbers(), vec![1, 1, 2, 3, 5]);
    }
}
