//! # dnsgate-provider
//!
//! Unified DNS record management across independent DNS hosting providers.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [DNSPod](https://www.dnspod.cn/) | `dnspod` | Login token form field |
//! | [Aliyun DNS](https://www.aliyun.com/product/dns) | `aliyun` | HMAC-SHA1 signed query (RPC, v1.0) |
//! | [Volcengine DNS](https://www.volcengine.com/product/dns) | `volcengine` | HMAC-SHA256 signed request |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: enable every provider listed above.
//! - **`dnspod`**, **`aliyun`**, **`volcengine`**: enable a single provider.
//! - **`native-tls`** *(default)* or **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnsgate_provider::{
//!     AliyunCredentials, CreateRecordRequest, ProviderCredentials, ProviderManager,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ProviderCredentials {
//!         aliyun: Some(AliyunCredentials::new("your-key-id", "your-key-secret")),
//!         ..Default::default()
//!     };
//!     let manager = ProviderManager::new(&credentials)?;
//!
//!     // An empty provider ID routes to the default (first configured) provider.
//!     for domain in manager.list_domains("", None).await? {
//!         println!("{} ({})", domain.name, domain.id);
//!     }
//!
//!     let request = CreateRecordRequest::new("example.com", "www", "A", "203.0.113.5");
//!     let record = manager.create_record("aliyun", request).await?;
//!     println!("created record {}", record.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::ProviderNotConfigured`]: the targeted provider has no credentials;
//!   raised before any request is sent.
//! - [`ProviderError::ProtocolError`]: the response is not the expected envelope
//!   (HTML error page, malformed JSON); carries a body excerpt.
//! - [`ProviderError::ProviderApiError`]: the provider reported a failure; the message is
//!   the provider's own text.
//!
//! Nothing is retried. Every adapter call performs exactly one external request.

mod error;
mod factory;
mod http_client;
mod manager;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ApiErrorKind, ProviderError, Result};

pub use factory::{create_configured_providers, create_provider, is_compiled_in};

pub use manager::{DnsOperation, OperationOutput, ProviderManager};

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

pub use types::{
    AliyunCredentials, BatchCreateFailure, BatchCreateResult, BatchRecordFailure,
    BatchRecordResult, BatchUpdateItem, BatchUpdateResult, CreateRecordRequest, DEFAULT_LINE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TTL, DnsRecord, DnsRecordType, DnspodCredentials,
    MAX_TTL, ProviderCredentials, ProviderDomain, ProviderKind, RecordStatus,
    UpdateRecordRequest, VolcengineCredentials, clamp_ttl, normalize_ttl,
};

#[cfg(feature = "aliyun")]
pub use providers::{AliyunDomain, AliyunProvider, AliyunProviderBuilder};

#[cfg(feature = "dnspod")]
pub use providers::{DnspodDomain, DnspodProvider, DnspodProviderBuilder};

/// Volcengine session seam and SDK-shaped request/response types.
#[cfg(feature = "volcengine")]
pub use providers::volcengine;

#[cfg(feature = "volcengine")]
pub use providers::VolcengineProvider;
