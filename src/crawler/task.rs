//! A single page's crawl: fetch, then extract

use crate::crawler::extractor::{extract_page, Candidate};
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::state::PageState;
use crate::url::{CanonicalUrl, LinkResolution};
use reqwest::Client;

/// What a finished page task hands back to the coordinator
#[derive(Debug)]
pub struct TaskReport {
    /// The page this task crawled
    pub url: CanonicalUrl,

    /// Terminal state, either `Extracted` or `FetchFailed`
    pub state: PageState,

    /// Candidates found on the page, in document order
    pub candidates: Vec<Candidate>,
}

impl TaskReport {
    pub(crate) fn failed(url: CanonicalUrl) -> Self {
        Self {
            url,
            state: PageState::FetchFailed,
            candidates: Vec::new(),
        }
    }
}

/// Crawls one queued page through to a terminal state
///
/// The page moves Queued -> Fetching -> Extracted | FetchFailed. Links are
/// resolved against the URL the body was actually served from, so redirects
/// are taken into account. Failures are logged and reported, never retried.
pub async fn crawl_page(
    client: &Client,
    url: CanonicalUrl,
    resolution: LinkResolution,
) -> TaskReport {
    tracing::debug!("Fetching {}", url);

    let result = fetch_url(client, url.as_str()).await;
    let state = result.state();

    match result {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            let candidates = extract_page(&body, &final_url, resolution);
            tracing::debug!(
                "Extracted {} candidates from {} (HTTP {})",
                candidates.len(),
                url,
                status_code
            );
            TaskReport {
                url,
                state,
                candidates,
            }
        }
        FetchResult::NotHtml {
            final_url,
            content_type,
        } => {
            tracing::debug!("{} is {}, nothing to extract", final_url, content_type);
            TaskReport {
                url,
                state,
                candidates: Vec::new(),
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("Fetch of {} failed: HTTP {}", url, status_code);
            TaskReport::failed(url)
        }
        FetchResult::NetworkError { error } => {
            tracing::debug!("Fetch of {} failed: {}", url, error);
            TaskReport::failed(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crawler::build_http_client;
    use crate::crawler::extractor::LinkKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_url(server: &MockServer, route: &str) -> CanonicalUrl {
        CanonicalUrl::parse(&format!("{}{}", server.uri(), route)).unwrap()
    }

    #[tokio::test]
    async fn test_crawl_page_extracts_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<a href="/about">About</a><img src="/logo.png">"#,
                "text/html",
            ))
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default()).unwrap();
        let report = crawl_page(
            &client,
            page_url(&server, "/index"),
            LinkResolution::Reference,
        )
        .await;

        assert_eq!(report.state, PageState::Extracted);
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.candidates[0].kind, LinkKind::Page);
        assert_eq!(
            report.candidates[0].url.as_str(),
            format!("{}/about", server.uri())
        );
        assert_eq!(report.candidates[1].kind, LinkKind::Image);
    }

    #[tokio::test]
    async fn test_crawl_page_resolves_against_redirect_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/docs/intro", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/docs/intro"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"<a href="next">Next</a>"#, "text/html"),
            )
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default()).unwrap();
        let report = crawl_page(
            &client,
            page_url(&server, "/old"),
            LinkResolution::Reference,
        )
        .await;

        assert_eq!(report.state, PageState::Extracted);
        assert_eq!(
            report.candidates[0].url.as_str(),
            format!("{}/docs/next", server.uri())
        );
    }

    #[tokio::test]
    async fn test_crawl_page_failure_has_no_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default()).unwrap();
        let report = crawl_page(
            &client,
            page_url(&server, "/broken"),
            LinkResolution::Reference,
        )
        .await;

        assert_eq!(report.state, PageState::FetchFailed);
        assert!(report.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_crawl_page_non_html_is_extracted_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8, 0x50], "image/png"))
            .mount(&server)
            .await;

        let client = build_http_client(&Config::default()).unwrap();
        let report = crawl_page(
            &client,
            page_url(&server, "/logo.png"),
            LinkResolution::Reference,
        )
        .await;

        assert_eq!(report.state, PageState::Extracted);
        assert!(report.candidates.is_empty());
    }
}
