//! Provider Manager: routes unified operations to a configured provider.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::factory::create_configured_providers;
use crate::traits::DnsProvider;
use crate::types::{
    BatchCreateResult, BatchRecordResult, BatchUpdateItem, BatchUpdateResult,
    CreateRecordRequest, DEFAULT_LINE, DnsRecord, ProviderCredentials, ProviderDomain,
    ProviderKind, RecordStatus, UpdateRecordRequest, clamp_ttl,
};

/// A single unified operation, as accepted by [`ProviderManager::dispatch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DnsOperation {
    ListDomains {
        #[serde(default)]
        keyword: Option<String>,
    },
    ListRecords {
        domain_id: String,
        #[serde(default)]
        subdomain: Option<String>,
    },
    CreateRecord(CreateRecordRequest),
    UpdateRecord {
        record_id: String,
        request: UpdateRecordRequest,
    },
    DeleteRecord {
        record_id: String,
        domain_id: String,
    },
    SetRecordStatus {
        record_id: String,
        domain_id: String,
        status: RecordStatus,
    },
}

impl DnsOperation {
    /// Operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListDomains { .. } => "list_domains",
            Self::ListRecords { .. } => "list_records",
            Self::CreateRecord(_) => "create_record",
            Self::UpdateRecord { .. } => "update_record",
            Self::DeleteRecord { .. } => "delete_record",
            Self::SetRecordStatus { .. } => "set_record_status",
        }
    }
}

/// Normalized result of a dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum OperationOutput {
    Domains(Vec<ProviderDomain>),
    Records(Vec<DnsRecord>),
    Record(DnsRecord),
    /// Delete / status change succeeded.
    Done,
}

/// Holds the configured providers and routes calls by provider identifier.
///
/// An empty or unknown identifier resolves to the default provider, the first entry of
/// [`ProviderKind::PRIORITY`] that is configured. Resolution happens before every call;
/// a provider without credentials yields [`ProviderError::ProviderNotConfigured`] and no
/// request is sent.
///
/// ```rust,no_run
/// use dnsgate_provider::{CreateRecordRequest, ProviderCredentials, ProviderManager};
///
/// # async fn run(credentials: ProviderCredentials) -> dnsgate_provider::Result<()> {
/// let manager = ProviderManager::new(&credentials)?;
/// let record = manager
///     .create_record("dnspod", CreateRecordRequest::new("example.com", "www", "A", "203.0.113.5"))
///     .await?;
/// println!("created {}", record.id);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ProviderManager {
    providers: HashMap<ProviderKind, Arc<dyn DnsProvider>>,
}

impl ProviderManager {
    /// Builds one provider per complete credential bundle.
    pub fn new(credentials: &ProviderCredentials) -> Result<Self> {
        let mut manager = Self::default();
        for provider in create_configured_providers(credentials)? {
            manager = manager.with_provider(provider);
        }
        log::info!(
            "DNS providers configured: {:?}, default: {:?}",
            manager.configured_providers(),
            manager.default_provider()
        );
        Ok(manager)
    }

    /// Registers (or replaces) the provider for its [`DnsProvider::kind`].
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn DnsProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    /// Whether `provider_id` names a configured provider.
    ///
    /// Unknown identifiers return `false` even though [`dispatch`](Self::dispatch) would
    /// route them to the default provider.
    pub fn supports(&self, provider_id: &str) -> bool {
        ProviderKind::parse(provider_id).is_some_and(|kind| self.providers.contains_key(&kind))
    }

    /// Configured providers in priority order.
    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::PRIORITY
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }

    /// The provider used for empty or unknown identifiers.
    pub fn default_provider(&self) -> Option<ProviderKind> {
        self.configured_providers().into_iter().next()
    }

    fn resolve_kind(&self, provider_id: &str) -> Result<ProviderKind> {
        match ProviderKind::parse(provider_id) {
            Some(kind) if self.providers.contains_key(&kind) => Ok(kind),
            Some(kind) => Err(ProviderError::ProviderNotConfigured {
                provider: kind.as_str().to_string(),
            }),
            None => self.default_provider().ok_or_else(|| {
                ProviderError::ProviderNotConfigured {
                    provider: if provider_id.trim().is_empty() {
                        "default".to_string()
                    } else {
                        provider_id.trim().to_string()
                    },
                }
            }),
        }
    }

    /// Resolves `provider_id` to a configured provider.
    pub fn resolve(&self, provider_id: &str) -> Result<Arc<dyn DnsProvider>> {
        let kind = self.resolve_kind(provider_id)?;
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| ProviderError::ProviderNotConfigured {
                provider: kind.as_str().to_string(),
            })
    }

    /// Borrows the concrete provider type for provider-specific accessors such as
    /// [`DnspodProvider::domain_details`](crate::DnspodProvider::domain_details).
    pub fn provider_as<T: DnsProvider + 'static>(&self, provider_id: &str) -> Result<&T> {
        let kind = self.resolve_kind(provider_id)?;
        self.providers
            .get(&kind)
            .and_then(|p| p.as_any().downcast_ref::<T>())
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: kind.as_str().to_string(),
                param: "provider".to_string(),
                detail: format!("'{provider_id}' does not resolve to the requested provider type"),
            })
    }

    /// Routes one operation to the resolved provider.
    pub async fn dispatch(&self, provider_id: &str, op: DnsOperation) -> Result<OperationOutput> {
        let provider = self.resolve(provider_id)?;
        log::debug!("[{}] dispatch {}", provider.id(), op.name());

        match op {
            DnsOperation::ListDomains { keyword } => provider
                .list_domains(keyword.as_deref())
                .await
                .map(OperationOutput::Domains),
            DnsOperation::ListRecords {
                domain_id,
                subdomain,
            } => provider
                .list_records(&domain_id, subdomain.as_deref())
                .await
                .map(OperationOutput::Records),
            DnsOperation::CreateRecord(req) => provider
                .create_record(&normalize_request(req))
                .await
                .map(OperationOutput::Record),
            DnsOperation::UpdateRecord { record_id, request } => provider
                .update_record(&record_id, &normalize_request(request))
                .await
                .map(OperationOutput::Record),
            DnsOperation::DeleteRecord {
                record_id,
                domain_id,
            } => provider
                .delete_record(&record_id, &domain_id)
                .await
                .map(|()| OperationOutput::Done),
            DnsOperation::SetRecordStatus {
                record_id,
                domain_id,
                status,
            } => provider
                .set_record_status(&record_id, &domain_id, status)
                .await
                .map(|()| OperationOutput::Done),
        }
    }

    // ============ 单项操作 ============

    pub async fn list_domains(
        &self,
        provider_id: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<ProviderDomain>> {
        self.resolve(provider_id)?.list_domains(keyword).await
    }

    pub async fn list_records(
        &self,
        provider_id: &str,
        domain_id: &str,
        subdomain: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        self.resolve(provider_id)?
            .list_records(domain_id, subdomain)
            .await
    }

    pub async fn create_record(
        &self,
        provider_id: &str,
        req: CreateRecordRequest,
    ) -> Result<DnsRecord> {
        let provider = self.resolve(provider_id)?;
        provider.create_record(&normalize_request(req)).await
    }

    pub async fn update_record(
        &self,
        provider_id: &str,
        record_id: &str,
        req: UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let provider = self.resolve(provider_id)?;
        provider
            .update_record(record_id, &normalize_request(req))
            .await
    }

    pub async fn delete_record(
        &self,
        provider_id: &str,
        record_id: &str,
        domain_id: &str,
    ) -> Result<()> {
        self.resolve(provider_id)?
            .delete_record(record_id, domain_id)
            .await
    }

    pub async fn set_record_status(
        &self,
        provider_id: &str,
        record_id: &str,
        domain_id: &str,
        status: RecordStatus,
    ) -> Result<()> {
        self.resolve(provider_id)?
            .set_record_status(record_id, domain_id, status)
            .await
    }

    // ============ 批量操作 ============

    pub async fn batch_create_records(
        &self,
        provider_id: &str,
        requests: Vec<CreateRecordRequest>,
    ) -> Result<BatchCreateResult> {
        let provider = self.resolve(provider_id)?;
        let requests: Vec<_> = requests.into_iter().map(normalize_request).collect();
        provider.batch_create_records(&requests).await
    }

    pub async fn batch_update_records(
        &self,
        provider_id: &str,
        updates: Vec<BatchUpdateItem>,
    ) -> Result<BatchUpdateResult> {
        let provider = self.resolve(provider_id)?;
        let updates: Vec<_> = updates
            .into_iter()
            .map(|item| BatchUpdateItem {
                record_id: item.record_id,
                request: normalize_request(item.request),
            })
            .collect();
        provider.batch_update_records(&updates).await
    }

    pub async fn batch_delete_records(
        &self,
        provider_id: &str,
        domain_id: &str,
        record_ids: &[String],
    ) -> Result<BatchRecordResult> {
        self.resolve(provider_id)?
            .batch_delete_records(domain_id, record_ids)
            .await
    }

    pub async fn batch_set_record_status(
        &self,
        provider_id: &str,
        domain_id: &str,
        record_ids: &[String],
        status: RecordStatus,
    ) -> Result<BatchRecordResult> {
        self.resolve(provider_id)?
            .batch_set_record_status(domain_id, record_ids, status)
            .await
    }
}

/// TTL 限制到 `[1, MAX_TTL]`，空线路换成默认线路
fn normalize_request(mut req: CreateRecordRequest) -> CreateRecordRequest {
    req.ttl = clamp_ttl(req.ttl);
    if req.line.trim().is_empty() {
        req.line = DEFAULT_LINE.to_string();
    }
    req
}
