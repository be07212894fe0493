//! Static fetcher returning preconfigured numbers per source
//!
//! Used to inject deterministic fixtures in tests. Sources without an
//! entry yield an empty list.

use super::{FetchError, NumberFetcher, NumberSource};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FixedFetcher {
    numbers: HashMap<NumberSource, Vec<i64>>,
    fail: bool,
}

impl FixedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher that fails every call with `FetchError::Unavailable`
    pub fn failing() -> Self {
        Self {
            numbers: HashMap::new(),
            fail: true,
        }
    }

    pub fn with(mut self, source: NumberSource, numbers: Vec<i64>) -> Self {
        self.numbers.insert(source, numbers);
        self
    }
}

#[async_trait]
impl NumberFetcher for FixedFetcher {
    async fn fetch(&self, source: NumberSource) -> Result<Vec<i64>, FetchError> {
        if self.fail {
            return Err(FetchError::Unavailable(format!(
                "fixed fetcher configured to fail ({})",
                source.as_str()
            )));
        }
        Ok(self.numbers.get(&source).cloned().unwrap_or_default())
    }

    fn fetcher_type(&self) -> &'static str {
        "fixed"
    }
}
