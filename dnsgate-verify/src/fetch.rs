//! HTTP seam used by the file check.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{VerifyError, VerifyResult};

/// Largest verification file body read; the expected content is a 32-char token.
pub const MAX_FILE_BYTES: usize = 4096;

fn too_large(limit: usize) -> VerifyError {
    VerifyError::Http(format!("verification file exceeds {limit} bytes"))
}

/// Fetches the body of a verification file.
///
/// Anything other than a `200 OK` with a readable body of at most [`MAX_FILE_BYTES`]
/// is a [`VerifyError::Http`].
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> VerifyResult<String>;
}

/// [`FileFetcher`] backed by a shared `reqwest` client with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFileFetcher {
    client: Client,
}

impl HttpFileFetcher {
    pub fn new(timeout: Duration) -> VerifyResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| VerifyError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> VerifyResult<String> {
        log::debug!("[verify] GET {url}");
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| VerifyError::Http(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VerifyError::Http(format!("HTTP status {}", status.as_u16())));
        }
        if response
            .content_length()
            .is_some_and(|len| len > MAX_FILE_BYTES as u64)
        {
            return Err(too_large(MAX_FILE_BYTES));
        }

        // 没有 Content-Length 时边读边计数，超限立即放弃
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| VerifyError::Http(e.to_string()))?
        {
            if body.len() + chunk.len() > MAX_FILE_BYTES {
                return Err(too_large(MAX_FILE_BYTES));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: String) -> (MockServer, HttpFileFetcher) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/cdn-auth-0123456789abcdef.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        (server, HttpFileFetcher::new(Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_small_body() {
        let (server, fetcher) = serve("0123456789abcdef0123456789abcdef\n".to_string()).await;
        let body = fetcher
            .fetch(&format!("{}/.well-known/cdn-auth-0123456789abcdef.txt", server.uri()))
            .await
            .unwrap();
        assert_eq!(body.trim(), "0123456789abcdef0123456789abcdef");
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_body() {
        let (server, fetcher) = serve("a".repeat(MAX_FILE_BYTES * 16)).await;
        let result = fetcher
            .fetch(&format!("{}/.well-known/cdn-auth-0123456789abcdef.txt", server.uri()))
            .await;
        assert_eq!(
            result,
            Err(VerifyError::Http(format!(
                "verification file exceeds {MAX_FILE_BYTES} bytes"
            )))
        );
    }

    #[tokio::test]
    async fn test_fetch_non_200() {
        let server = MockServer::start().await;
        let fetcher = HttpFileFetcher::new(Duration::from_secs(5)).unwrap();
        let result = fetcher.fetch(&format!("{}/missing.txt", server.uri())).await;
        assert_eq!(result, Err(VerifyError::Http("HTTP status 404".to_string())));
    }
}
