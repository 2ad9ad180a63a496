//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "aliyun")]
mod aliyun;
#[cfg(feature = "dnspod")]
mod dnspod;
#[cfg(feature = "volcengine")]
pub mod volcengine;

#[cfg(feature = "aliyun")]
pub use aliyun::{AliyunDomain, AliyunProvider, AliyunProviderBuilder};
#[cfg(feature = "dnspod")]
pub use dnspod::{DnspodDomain, DnspodProvider, DnspodProviderBuilder};
#[cfg(feature = "volcengine")]
pub use volcengine::VolcengineProvider;
