//! Send / read / decode steps shared by the HTTP adapters.
//!
//! Signing stays inside each adapter: DNSPod posts a login token, Aliyun signs the query
//! string and Volcengine signs headers. What is shared is everything after the
//! `RequestBuilder` is ready. Requests are sent once and never retried here.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiErrorKind, ProviderError};
use crate::utils::log_sanitizer::truncate_for_log;

/// Maximum number of characters of a response body kept in a `ProtocolError` excerpt.
const EXCERPT_MAX_CHARS: usize = 200;

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    let detail = e.to_string();
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail,
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail,
        }
    }
}

pub struct HttpUtils;

impl HttpUtils {
    /// Sends `request` and reads the whole body.
    ///
    /// `method` and `target` only feed the debug log. Any status is returned to the caller
    /// except 429, which becomes a `RateLimited` [`ProviderError::ProviderApiError`].
    pub async fn execute_request(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        target: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider}] --> {method} {target}");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, &e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("reading body of HTTP {}: {e}", status.as_u16()),
            })?;
        log::debug!(
            "[{provider}] <-- {} {}",
            status.as_u16(),
            truncate_for_log(&body)
        );

        if status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("[{provider}] throttled by upstream (HTTP 429)");
            let message = if body.trim().is_empty() {
                "HTTP 429 Too Many Requests".to_string()
            } else {
                body
            };
            return Err(ProviderError::ProviderApiError {
                provider: provider.to_string(),
                kind: ApiErrorKind::RateLimited,
                raw_code: Some("429".to_string()),
                message,
            });
        }

        Ok((status.as_u16(), body))
    }

    /// Rejects bodies that cannot be the JSON envelope of any supported API.
    ///
    /// An empty body, or one whose first non-whitespace byte is `<` (an HTML error page from a
    /// gateway or WAF), yields `ProtocolError` carrying a short excerpt.
    pub fn ensure_json_body(
        response_text: &str,
        status_code: u16,
        provider_name: &str,
    ) -> Result<(), ProviderError> {
        let trimmed = response_text.trim_start();
        if trimmed.is_empty() {
            return Err(ProviderError::ProtocolError {
                provider: provider_name.to_string(),
                detail: format!("empty response body (HTTP {status_code})"),
                excerpt: String::new(),
            });
        }
        if trimmed.starts_with('<') {
            log::error!("[{provider_name}] Received HTML instead of JSON (HTTP {status_code})");
            return Err(ProviderError::ProtocolError {
                provider: provider_name.to_string(),
                detail: format!("expected JSON, received HTML (HTTP {status_code})"),
                excerpt: excerpt(trimmed),
            });
        }
        Ok(())
    }

    /// Decodes `body` as `T`; a mismatch is a [`ProviderError::ProtocolError`].
    pub fn parse_json<T>(body: &str, provider: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] undecodable response ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ProtocolError {
                provider: provider.to_string(),
                detail: format!("malformed JSON: {e}"),
                excerpt: excerpt(body),
            }
        })
    }
}

/// Cuts a response body down to a char-boundary-safe excerpt.
pub(crate) fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
