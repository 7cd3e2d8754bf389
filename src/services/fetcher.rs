// src/services/fetcher.rs

//! Single-request upstream fetcher.
//!
//! One call is one outbound GET. Nothing is retried or cached here.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;

/// Source of raw upstream documents.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` with the given query parameters and return the decoded body.
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
///
/// The client's connection pool is the only state shared between requests;
/// a failed request leaves nothing behind in it.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    default_charset: String,
}

impl HttpFetcher {
    /// Wrap a configured client. `default_charset` decodes bodies whose
    /// response does not declare a charset.
    pub fn new(client: Client, default_charset: impl Into<String>) -> Self {
        Self {
            client,
            default_charset: default_charset.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        log::debug!("GET {} {:?}", url, query);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        Ok(response.text_with_charset(&self.default_charset).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::{StatusCode, header};
    use axum::routing::get;

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(timeout: Duration) -> HttpFetcher {
        let client = Client::builder().timeout(timeout).build().unwrap();
        HttpFetcher::new(client, "euc-kr")
    }

    fn test_app() -> Router {
        Router::new()
            .route(
                "/echo",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    format!("page={}", q.get("currentPage").cloned().unwrap_or_default())
                }),
            )
            .route(
                "/euc-kr",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, "text/html")],
                        vec![0xb9u8, 0xfd, 0xbf, 0xf8],
                    )
                }),
            )
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    "late"
                }),
            )
    }

    #[tokio::test]
    async fn test_fetch_sends_query() {
        let base = serve(test_app()).await;
        let body = fetcher(Duration::from_secs(5))
            .fetch(&format!("{base}/echo"), &[("currentPage", "4")])
            .await
            .unwrap();
        assert_eq!(body, "page=4");
    }

    #[tokio::test]
    async fn test_fetch_decodes_default_charset() {
        let base = serve(test_app()).await;
        let body = fetcher(Duration::from_secs(5))
            .fetch(&format!("{base}/euc-kr"), &[])
            .await
            .unwrap();
        assert_eq!(body, "법원");
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let base = serve(test_app()).await;
        let err = fetcher(Duration::from_secs(5))
            .fetch(&format!("{base}/broken"), &[])
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(500));
    }

    #[tokio::test]
    async fn test_fetch_reports_timeout() {
        let base = serve(test_app()).await;
        let err = fetcher(Duration::from_millis(200))
            .fetch(&format!("{base}/slow"), &[])
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher(Duration::from_secs(5))
            .fetch(&format!("http://{addr}/"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ConnectionFailed(_)));
    }
}
