//! Gateway configuration (TOML).

use std::path::Path;

use dnsgate_provider::ProviderCredentials;
use dnsgate_verify::VerifierConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Everything the gateway needs, passed by value into [`Gateway::new`](crate::Gateway::new).
///
/// ```toml
/// [providers]
/// request_timeout_secs = 10
///
/// [providers.dnspod]
/// login_token = "12345,abcdef"
///
/// [providers.volcengine]
/// access_key_id = "AKLT..."
/// secret_access_key = "..."
/// region = "cn-north-1"
///
/// [verification]
/// resolvers = ["8.8.8.8:53", "223.5.5.5:53"]
/// verification_domain = "xldns.com"
/// timeout_secs = 10
/// ```
///
/// Every table is optional; a missing table means no provider credentials or the
/// default verifier settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub providers: ProviderCredentials,
    pub verification: VerifierConfig,
}

impl GatewayConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("Loading gateway configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Serializes back to TOML.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Rejects values that would make every verification check fail.
    pub fn validate(&self) -> CoreResult<()> {
        if self.verification.resolvers.is_empty() {
            return Err(CoreError::InvalidConfig {
                key: "verification.resolvers".to_string(),
                reason: "at least one resolver is required".to_string(),
            });
        }
        let domain = self.verification.verification_domain.trim();
        if domain.is_empty() || domain.contains(char::is_whitespace) {
            return Err(CoreError::InvalidConfig {
                key: "verification.verification_domain".to_string(),
                reason: format!("'{domain}' is not a domain name"),
            });
        }
        if self.verification.timeout_secs == 0 {
            return Err(CoreError::InvalidConfig {
                key: "verification.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.providers.request_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig {
                key: "providers.request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
