//! Reputation lookup: searches the web for what is said about a person.
//!
//! Fails open: a search error is logged and yields an empty list, so the
//! résumé flow that calls this never fails because of it.

use tracing::{info, warn};

use crate::search::{SearchHit, SearchProvider};

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Quoted name plus reputation, review, issue, controversy, achievement and
/// publication keywords.
pub fn build_reputation_query(name: &str) -> String {
    format!(r#""{name}" 평판 후기 OR 리뷰 OR "문제" OR "논란" OR "성과" OR "논문""#)
}

/// Returns at most `max_results` (snippet, url) hits for `name`.
/// A blank name returns nothing without calling the search provider.
pub async fn fetch_reputation(
    name: &str,
    search: &dyn SearchProvider,
    max_results: usize,
) -> Vec<SearchHit> {
    let name = name.trim();
    if name.is_empty() {
        return Vec::new();
    }

    let query = build_reputation_query(name);
    match search.search(&query, max_results).await {
        Ok(mut hits) => {
            hits.truncate(max_results);
            info!("Reputation lookup for {name:?}: {} hits", hits.len());
            hits
        }
        Err(e) => {
            warn!("Reputation lookup failed for {name:?}: {e}");
            Vec::new()
        }
    }
}
