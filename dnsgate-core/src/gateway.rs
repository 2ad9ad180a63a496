use dnsgate_provider::{DnsOperation, OperationOutput, ProviderKind, ProviderManager};
use dnsgate_verify::{Challenge, VerificationEngine, VerificationResult};

use crate::config::GatewayConfig;
use crate::error::{CoreError, CoreResult};

/// Provider manager and verification engine built from one [`GatewayConfig`].
///
/// The two halves are independent: verification never goes through a DNS provider.
pub struct Gateway {
    providers: ProviderManager,
    verifier: VerificationEngine,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> CoreResult<Self> {
        config.validate()?;
        let providers = ProviderManager::new(&config.providers)?;
        let verifier = VerificationEngine::new(config.verification)?;
        Ok(Self::from_parts(providers, verifier))
    }

    pub fn from_parts(providers: ProviderManager, verifier: VerificationEngine) -> Self {
        Self {
            providers,
            verifier,
        }
    }

    pub fn providers(&self) -> &ProviderManager {
        &self.providers
    }

    pub fn verifier(&self) -> &VerificationEngine {
        &self.verifier
    }

    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        self.providers.configured_providers()
    }

    pub fn supports(&self, provider_id: &str) -> bool {
        self.providers.supports(provider_id)
    }

    /// Routes one DNS operation; see [`ProviderManager::dispatch`].
    pub async fn dispatch(
        &self,
        provider_id: &str,
        op: DnsOperation,
    ) -> CoreResult<OperationOutput> {
        let name = op.name();
        self.providers
            .dispatch(provider_id, op)
            .await
            .map_err(|e| log_failure(name, e.into()))
    }

    pub fn generate_challenge(
        &self,
        domain: &str,
        verification_type: &str,
    ) -> CoreResult<Challenge> {
        self.verifier
            .generate_challenge(domain, verification_type)
            .map_err(|e| log_failure("generate_challenge", e.into()))
    }

    pub async fn verify_domain(
        &self,
        domain: &str,
        verification_type: &str,
        challenge: &str,
    ) -> CoreResult<VerificationResult> {
        self.verifier
            .verify_domain(domain, verification_type, challenge)
            .await
            .map_err(|e| log_failure("verify_domain", e.into()))
    }
}

fn log_failure(action: &str, err: CoreError) -> CoreError {
    if err.is_expected() {
        log::warn!("{action} failed: {err}");
    } else {
        log::error!("{action} failed: {err}");
    }
    err
}
