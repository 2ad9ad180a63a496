//! # dnsgate-core
//!
//! Loads a [`GatewayConfig`] and wires the DNS provider manager
//! ([`dnsgate_provider`]) and the domain verification engine ([`dnsgate_verify`])
//! into a single [`Gateway`].
//!
//! ```rust,no_run
//! use dnsgate_core::{DnsOperation, Gateway, GatewayConfig};
//!
//! # async fn run() -> dnsgate_core::CoreResult<()> {
//! let gateway = Gateway::new(GatewayConfig::from_file("dnsgate.toml")?)?;
//! let domains = gateway
//!     .dispatch("", DnsOperation::ListDomains { keyword: None })
//!     .await?;
//! println!("{domains:?}");
//!
//! let challenge = gateway.generate_challenge("example.com", "dns")?;
//! println!("publish {} at {:?}", challenge.expected_value(), challenge.record_name);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod gateway;

pub use config::GatewayConfig;
pub use error::{CoreError, CoreResult, ProviderError, VerifyError};
pub use gateway::Gateway;

pub use dnsgate_provider::{
    CreateRecordRequest, DnsOperation, DnsRecord, OperationOutput, ProviderCredentials,
    ProviderDomain, ProviderKind, ProviderManager, RecordStatus,
};
pub use dnsgate_verify::{
    Challenge, VerificationEngine, VerificationResult, VerificationType, VerifierConfig,
};
