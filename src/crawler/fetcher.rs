//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Classifying responses into the page states they lead to
//!
//! There is no retry; a failed fetch drops the page.

use crate::config::Config;
use crate::state::PageState;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Successful response that is not HTML; there is nothing to extract
    NotHtml {
        /// Final URL after redirects
        final_url: Url,
        /// The Content-Type received
        content_type: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// The terminal page state this result leads to
    pub fn state(&self) -> PageState {
        match self {
            Self::Success { .. } | Self::NotHtml { .. } => PageState::Extracted,
            Self::HttpError { .. } | Self::NetworkError { .. } => PageState::FetchFailed,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects follow reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use ripple_sitemap::config::Config;
/// use ripple_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML (or no) Content-Type | Success |
/// | 2xx with another Content-Type | NotHtml (body not downloaded) |
/// | Any other status | HttpError |
/// | Connect/timeout/body errors | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::NotHtml {
            final_url,
            content_type,
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Missing Content-Type is given the benefit of the doubt
fn is_html(content_type: &str) -> bool {
    content_type.is_empty() || content_type.to_ascii_lowercase().contains("html")
}
