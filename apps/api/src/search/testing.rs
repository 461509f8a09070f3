//! Fake search providers for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{SearchError, SearchHit, SearchProvider};

/// Returns a fixed hit list and records queries.
pub struct StaticSearch {
    pub hits: Vec<SearchHit>,
    pub queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn with_hits(n: usize) -> Self {
        Self {
            hits: (1..=n)
                .map(|i| SearchHit {
                    snippet: format!("결과 {i}"),
                    url: format!("https://example.com/{i}"),
                })
                .collect(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str, _max: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.hits.clone())
    }
}

/// Fails every search with a 503.
pub struct BrokenSearch;

#[async_trait]
impl SearchProvider for BrokenSearch {
    async fn search(&self, _query: &str, _max: usize) -> Result<Vec<SearchHit>, SearchError> {
        Err(SearchError::Api {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}
