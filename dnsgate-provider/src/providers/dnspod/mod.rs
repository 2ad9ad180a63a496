//! `DNSPod` Provider（dnsapi.cn 旧版 Token API）

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::{DEFAULT_REQUEST_TIMEOUT_SECS, DnspodCredentials};

pub use types::DnspodDomain;

pub(crate) const DNSPOD_API_ENDPOINT: &str = "https://dnsapi.cn";
/// `Record.List` 单次最多返回条数
pub(crate) const MAX_RECORD_LENGTH: u32 = 3000;
/// MX 记录未指定优先级时提交的 `mx`
pub(crate) const DEFAULT_MX_PRIORITY: i64 = 10;

/// `DNSPod` Provider
///
/// Authenticates with a login token (`"<id>,<token>"`) sent as a form field on every
/// `POST`. Domains may be addressed either by numeric ID or by name.
pub struct DnspodProvider {
    pub(crate) client: Client,
    pub(crate) login_token: String,
    pub(crate) endpoint: String,
}

/// `DNSPod` Provider Builder
pub struct DnspodProviderBuilder {
    login_token: String,
    endpoint: String,
    timeout_secs: u64,
}

impl DnspodProviderBuilder {
    fn new(login_token: String) -> Self {
        Self {
            login_token,
            endpoint: DNSPOD_API_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// API base URL (default: `https://dnsapi.cn`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<DnspodProvider> {
        Ok(DnspodProvider {
            client: create_http_client("dnspod", self.timeout_secs)?,
            login_token: self.login_token,
            endpoint: self.endpoint,
        })
    }
}

impl DnspodProvider {
    pub fn builder(login_token: impl Into<String>) -> DnspodProviderBuilder {
        DnspodProviderBuilder::new(login_token.into())
    }

    pub fn from_credentials(creds: &DnspodCredentials, timeout_secs: u64) -> Result<Self> {
        let mut builder = Self::builder(&creds.login_token).timeout_secs(timeout_secs);
        if let Some(endpoint) = &creds.endpoint {
            builder = builder.endpoint(endpoint);
        }
        builder.build()
    }
}
