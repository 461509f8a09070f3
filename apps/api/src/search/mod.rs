/// Web search client: the only module that talks to the search engine.
///
/// Callers depend on the `SearchProvider` trait; `DuckDuckGoClient` is the
/// production transport. It runs a full web search against the DuckDuckGo
/// HTML endpoint and reads the organic results (title link + snippet).
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{header, Client, Url};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod reputation;
#[cfg(test)]
pub mod testing;

/// The HTML endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

static RESULT: Lazy<Selector> = Lazy::new(|| selector("div.result"));
static RESULT_LINK: Lazy<Selector> = Lazy::new(|| selector("a.result__a"));
static RESULT_SNIPPET: Lazy<Selector> = Lazy::new(|| selector(".result__snippet"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("result selector is valid")
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub snippet: String,
    pub url: String,
}

/// The web-search collaborator. Results are ordered as the engine ranked them.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

#[derive(Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    base_url: String,
}

impl DuckDuckGoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        // region: worldwide, safe search: off
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("q", query), ("kl", "wt-wt"), ("kp", "-2")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        let hits = parse_results(&body, max_results);
        debug!("Search returned {} hits for {:?}", hits.len(), query);
        Ok(hits)
    }
}

/// Reads at most `max_results` organic hits from a results page, skipping ads
/// and entries without a link.
fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT)
        .filter(|result| {
            !result
                .value()
                .classes()
                .any(|class| class == "result--ad")
        })
        .filter_map(|result| {
            let href = result.select(&RESULT_LINK).next()?.value().attr("href")?;
            let url = resolve_link(href);
            if url.is_empty() {
                return None;
            }
            let snippet = result
                .select(&RESULT_SNIPPET)
                .next()
                .map(|s| collapse_whitespace(&s.text().collect::<String>()))
                .unwrap_or_default();
            Some(SearchHit { snippet, url })
        })
        .take(max_results)
        .collect()
}

/// Result links go through a `/l/?uddg=<target>` redirect; returns the target.
/// Direct links are returned unchanged.
fn resolve_link(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    match Url::parse(&absolute) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        Err(_) => absolute,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><body><div id="links">
        <div class="result results_links result--ad">
            <h2><a class="result__a" href="https://ads.example.com/promo">광고</a></h2>
            <a class="result__snippet" href="https://ads.example.com/promo">광고 문구</a>
        </div>
        <div class="result results_links results_links_deep web-result">
            <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fnews.example.com%2Fhong%3Fid%3D1&amp;rut=abc">홍길동 인터뷰</a></h2>
            <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x"><b>홍길동</b>의   연구 성과가
               호평을 받았다</a>
        </div>
        <div class="result results_links web-result">
            <h2><a class="result__a" href="https://blog.example.com/review">후기</a></h2>
            <a class="result__snippet">함께 일한 동료들의 리뷰</a>
        </div>
        <div class="result results_links web-result">
            <h2><a class="result__a" href="https://third.example.com/">세 번째</a></h2>
        </div>
        <div class="result results_links web-result">
            <h2><span class="result__a">링크 없음</span></h2>
        </div>
    </div></body></html>"#;

    #[test]
    fn test_parse_results_skips_ads_and_decodes_redirects() {
        let hits = parse_results(SAMPLE, 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].url, "https://news.example.com/hong?id=1");
        assert_eq!(hits[0].snippet, "홍길동의 연구 성과가 호평을 받았다");
        assert_eq!(hits[1].url, "https://blog.example.com/review");
        assert_eq!(hits[1].snippet, "함께 일한 동료들의 리뷰");
    }

    #[test]
    fn test_parse_results_missing_snippet_is_empty() {
        let hits = parse_results(SAMPLE, 10);
        assert_eq!(hits[2].url, "https://third.example.com/");
        assert!(hits[2].snippet.is_empty());
    }

    #[test]
    fn test_parse_results_respects_max_results() {
        assert_eq!(parse_results(SAMPLE, 2).len(), 2);
    }

    #[test]
    fn test_parse_results_no_results_page() {
        let html = r#"<html><body><div class="no-results">No results.</div></body></html>"#;
        assert!(parse_results(html, 5).is_empty());
    }

    #[test]
    fn test_resolve_link_direct_url_unchanged() {
        assert_eq!(resolve_link("https://example.com/a"), "https://example.com/a");
    }
}
