//! 阿里云 DNS Provider

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::{AliyunCredentials, DEFAULT_REQUEST_TIMEOUT_SECS};

pub use types::AliyunDomain;

pub(crate) const ALIYUN_DNS_ENDPOINT: &str = "https://alidns.aliyuncs.com/";
pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
pub(crate) const DEFAULT_REGION_ID: &str = "cn-hangzhou";
/// `DescribeDomains` 单页上限
pub(crate) const MAX_DOMAIN_PAGE_SIZE: u32 = 100;
/// `DescribeDomainRecords` 单页上限
pub(crate) const MAX_RECORD_PAGE_SIZE: u32 = 500;

/// Aliyun DNS provider implementation.
///
/// Every call is a signed `GET` against the RPC endpoint
/// (HMAC-SHA1, `SignatureVersion=1.0`). Domains are addressed by name.
///
/// # Construction
///
/// ```rust,no_run
/// use dnsgate_provider::AliyunProvider;
///
/// let provider = AliyunProvider::builder("your-access-key-id", "your-access-key-secret")
///     .region_id("cn-shanghai")
///     .build()?;
/// # Ok::<(), dnsgate_provider::ProviderError>(())
/// ```
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    pub(crate) region_id: String,
    pub(crate) endpoint: String,
}

/// Builder for [`AliyunProvider`].
pub struct AliyunProviderBuilder {
    access_key_id: String,
    access_key_secret: String,
    region_id: String,
    endpoint: String,
    timeout_secs: u64,
}

impl AliyunProviderBuilder {
    fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
            region_id: DEFAULT_REGION_ID.to_string(),
            endpoint: ALIYUN_DNS_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// `RegionId` public parameter (default: `cn-hangzhou`).
    pub fn region_id(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = region_id.into();
        self
    }

    /// Override the RPC endpoint (default: `https://alidns.aliyuncs.com/`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Per-request timeout in seconds (default: 10).
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the [`AliyunProvider`] instance.
    pub fn build(self) -> Result<AliyunProvider> {
        Ok(AliyunProvider {
            client: create_http_client("aliyun", self.timeout_secs)?,
            access_key_id: self.access_key_id,
            access_key_secret: self.access_key_secret,
            region_id: self.region_id,
            endpoint: self.endpoint,
        })
    }
}

impl AliyunProvider {
    /// Returns a builder for customizing the provider configuration.
    pub fn builder(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> AliyunProviderBuilder {
        AliyunProviderBuilder::new(access_key_id.into(), access_key_secret.into())
    }

    /// Creates a provider from a credential bundle.
    pub fn from_credentials(creds: &AliyunCredentials, timeout_secs: u64) -> Result<Self> {
        let mut builder = Self::builder(&creds.access_key_id, &creds.access_key_secret)
            .region_id(&creds.region_id)
            .timeout_secs(timeout_secs);
        if let Some(endpoint) = &creds.endpoint {
            builder = builder.endpoint(endpoint);
        }
        builder.build()
    }
}
