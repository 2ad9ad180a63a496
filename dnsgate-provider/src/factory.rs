//! Provider factory functions.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{ProviderCredentials, ProviderKind};
use crate::utils::log_sanitizer::mask_secret;

#[cfg(feature = "aliyun")]
use crate::providers::AliyunProvider;
#[cfg(feature = "dnspod")]
use crate::providers::DnspodProvider;
#[cfg(feature = "volcengine")]
use crate::providers::VolcengineProvider;

/// Creates the [`DnsProvider`] for `kind` from the matching credential bundle.
///
/// Returns [`ProviderError::ProviderNotConfigured`] when the bundle is missing or
/// incomplete, or when the provider's feature flag is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use dnsgate_provider::{create_provider, DnspodCredentials, ProviderCredentials, ProviderKind};
///
/// let credentials = ProviderCredentials {
///     dnspod: Some(DnspodCredentials::new("12345,abcdef")),
///     ..Default::default()
/// };
/// let provider = create_provider(ProviderKind::Dnspod, &credentials)?;
/// # Ok::<(), dnsgate_provider::ProviderError>(())
/// ```
pub fn create_provider(
    kind: ProviderKind,
    credentials: &ProviderCredentials,
) -> Result<Arc<dyn DnsProvider>> {
    if !credentials.is_configured(kind) {
        return Err(not_configured(kind));
    }
    let timeout = credentials.request_timeout_secs;

    match kind {
        #[cfg(feature = "dnspod")]
        ProviderKind::Dnspod => {
            let creds = credentials.dnspod.as_ref().ok_or_else(|| not_configured(kind))?;
            log::debug!("[dnspod] using login token {}", mask_secret(&creds.login_token));
            Ok(Arc::new(DnspodProvider::from_credentials(creds, timeout)?))
        }
        #[cfg(feature = "aliyun")]
        ProviderKind::Aliyun => {
            let creds = credentials.aliyun.as_ref().ok_or_else(|| not_configured(kind))?;
            log::debug!(
                "[aliyun] using access key {} in {}",
                mask_secret(&creds.access_key_id),
                creds.region_id
            );
            Ok(Arc::new(AliyunProvider::from_credentials(creds, timeout)?))
        }
        #[cfg(feature = "volcengine")]
        ProviderKind::Volcengine => {
            let creds = credentials
                .volcengine
                .as_ref()
                .ok_or_else(|| not_configured(kind))?;
            log::debug!(
                "[volcengine] using access key {} in {}",
                mask_secret(&creds.access_key_id),
                creds.region
            );
            Ok(Arc::new(VolcengineProvider::from_credentials(creds, timeout)?))
        }
        #[allow(unreachable_patterns)]
        _ => Err(not_configured(kind)),
    }
}

/// Builds every provider that has complete credentials, in default-priority order.
pub fn create_configured_providers(
    credentials: &ProviderCredentials,
) -> Result<Vec<Arc<dyn DnsProvider>>> {
    ProviderKind::PRIORITY
        .into_iter()
        .filter(|kind| credentials.is_configured(*kind) && is_compiled_in(*kind))
        .map(|kind| create_provider(kind, credentials))
        .collect()
}

/// Whether the provider's feature flag is enabled in this build.
pub fn is_compiled_in(kind: ProviderKind) -> bool {
    match kind {
        ProviderKind::Dnspod => cfg!(feature = "dnspod"),
        ProviderKind::Aliyun => cfg!(feature = "aliyun"),
        ProviderKind::Volcengine => cfg!(feature = "volcengine"),
    }
}

fn not_configured(kind: ProviderKind) -> ProviderError {
    ProviderError::ProviderNotConfigured {
        provider: kind.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AliyunCredentials, DnspodCredentials, VolcengineCredentials};

    #[test]
    fn missing_credentials_not_configured() {
        let result = create_provider(ProviderKind::Aliyun, &ProviderCredentials::default());
        assert!(matches!(
            result,
            Err(ProviderError::ProviderNotConfigured { ref provider }) if provider == "aliyun"
        ));
    }

    #[test]
    fn blank_credentials_not_configured() {
        let credentials = ProviderCredentials {
            dnspod: Some(DnspodCredentials::new("   ")),
            ..Default::default()
        };
        assert!(create_provider(ProviderKind::Dnspod, &credentials).is_err());
    }

    #[test]
    fn configured_providers_in_priority_order() {
        let credentials = ProviderCredentials {
            volcengine: Some(VolcengineCredentials::new("ak", "sk")),
            aliyun: Some(AliyunCredentials::new("id", "secret")),
            ..Default::default()
        };
        let providers = match create_configured_providers(&credentials) {
            Ok(p) => p,
            Err(e) => panic!("create failed: {e}"),
        };
        let ids: Vec<_> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["aliyun", "volcengine"]);
    }
}
