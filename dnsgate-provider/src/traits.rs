use std::any::Any;

use async_trait::async_trait;

use crate::error::{ApiErrorKind, ProviderError, Result};
use crate::types::{
    BatchCreateFailure, BatchCreateResult, BatchRecordFailure, BatchRecordResult,
    BatchUpdateItem, BatchUpdateResult, CreateRecordRequest, DnsRecord, ProviderDomain,
    ProviderKind, RecordStatus, UpdateRecordRequest,
};

/// provider 返回的错误码和消息，尚未归类
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 原生错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 出错时正在执行的动作，只用于日志，不改写 provider 返回的原始消息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 调用的 API 动作
    pub action: &'static str,
    /// 记录 ID
    pub record_id: Option<String>,
    /// 域名 / zone
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn action(action: &'static str) -> Self {
        Self {
            action,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }
}

/// 各 Provider 实现此 trait，把原生错误码归类到 [`ApiErrorKind`]
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    /// 错误码归类
    fn classify(&self, code: &str) -> ApiErrorKind;

    /// 将原始 API 错误映射到统一错误类型，消息原样保留
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let kind = raw
            .code
            .as_deref()
            .map_or(ApiErrorKind::Other, |code| self.classify(code));
        let err = ProviderError::ProviderApiError {
            provider: self.provider_name().to_string(),
            kind,
            raw_code: raw.code,
            message: raw.message,
        };
        if err.is_expected() {
            log::warn!(
                "[{}] {} failed (domain={:?}, record={:?}): {err}",
                self.provider_name(),
                context.action,
                context.domain,
                context.record_id
            );
        } else {
            log::error!(
                "[{}] {} failed (domain={:?}, record={:?}): {err}",
                self.provider_name(),
                context.action,
                context.domain,
                context.record_id
            );
        }
        err
    }

    /// 快捷方法：响应不是预期的结构
    fn protocol_error(&self, detail: impl ToString, excerpt: impl Into<String>) -> ProviderError {
        ProviderError::ProtocolError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
            excerpt: excerpt.into(),
        }
    }
}

/// DNS 提供商 Trait
///
/// One implementation per wire protocol. Every method performs at most one external call
/// and never retries; batch methods issue one call per item.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商类型
    fn kind(&self) -> ProviderKind;

    /// 提供商标识符
    fn id(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Downcast hook for provider-specific accessors
    /// (see [`ProviderManager::provider_as`](crate::ProviderManager::provider_as)).
    fn as_any(&self) -> &dyn Any;

    /// 获取域名列表，`keyword` 为可选的名称过滤
    async fn list_domains(&self, keyword: Option<&str>) -> Result<Vec<ProviderDomain>>;

    /// 获取 DNS 记录列表，`subdomain` 为可选的主机记录过滤
    async fn list_records(&self, domain_id: &str, subdomain: Option<&str>)
    -> Result<Vec<DnsRecord>>;

    /// 创建 DNS 记录
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord>;

    /// 更新 DNS 记录
    async fn update_record(&self, record_id: &str, req: &UpdateRecordRequest)
    -> Result<DnsRecord>;

    /// 删除 DNS 记录
    async fn delete_record(&self, record_id: &str, domain_id: &str) -> Result<()>;

    /// 启用 / 暂停 DNS 记录
    async fn set_record_status(
        &self,
        record_id: &str,
        domain_id: &str,
        status: RecordStatus,
    ) -> Result<()>;

    /// 批量创建：逐条并发调用 `create_record()`，单条失败不影响其余条目
    async fn batch_create_records(
        &self,
        requests: &[CreateRecordRequest],
    ) -> Result<BatchCreateResult> {
        let outcomes =
            futures::future::join_all(requests.iter().map(|req| self.create_record(req))).await;
        let (created_records, failed) = partition_outcomes(requests, outcomes);

        Ok(BatchCreateResult {
            success_count: created_records.len(),
            failed_count: failed.len(),
            created_records,
            failures: failed
                .into_iter()
                .map(|(index, req, reason)| BatchCreateFailure {
                    request_index: index,
                    record_name: req.name.clone(),
                    reason,
                })
                .collect(),
        })
    }

    async fn batch_update_records(&self, updates: &[BatchUpdateItem]) -> Result<BatchUpdateResult> {
        let outcomes = futures::future::join_all(
            updates
                .iter()
                .map(|item| self.update_record(&item.record_id, &item.request)),
        )
        .await;
        let (updated_records, failed) = partition_outcomes(updates, outcomes);

        Ok(BatchUpdateResult {
            success_count: updated_records.len(),
            failed_count: failed.len(),
            updated_records,
            failures: record_failures(failed, |item| item.record_id.clone()),
        })
    }

    async fn batch_delete_records(
        &self,
        domain_id: &str,
        record_ids: &[String],
    ) -> Result<BatchRecordResult> {
        let outcomes =
            futures::future::join_all(record_ids.iter().map(|id| self.delete_record(id, domain_id)))
                .await;
        Ok(record_batch(record_ids, outcomes))
    }

    /// 批量启用 / 暂停
    async fn batch_set_record_status(
        &self,
        domain_id: &str,
        record_ids: &[String],
        status: RecordStatus,
    ) -> Result<BatchRecordResult> {
        let outcomes = futures::future::join_all(
            record_ids
                .iter()
                .map(|id| self.set_record_status(id, domain_id, status)),
        )
        .await;
        Ok(record_batch(record_ids, outcomes))
    }
}

/// 按输入顺序拆分成功结果和失败条目（下标、输入、错误文本）
fn partition_outcomes<'a, I, T>(
    inputs: &'a [I],
    outcomes: Vec<Result<T>>,
) -> (Vec<T>, Vec<(usize, &'a I, String)>) {
    let mut ok = Vec::with_capacity(inputs.len());
    let mut failed = Vec::new();
    for (index, (input, outcome)) in inputs.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(value) => ok.push(value),
            Err(e) => failed.push((index, input, e.to_string())),
        }
    }
    (ok, failed)
}

fn record_failures<I>(
    failed: Vec<(usize, &I, String)>,
    record_id: impl Fn(&I) -> String,
) -> Vec<BatchRecordFailure> {
    failed
        .into_iter()
        .map(|(_, input, reason)| BatchRecordFailure {
            record_id: record_id(input),
            reason,
        })
        .collect()
}

fn record_batch(record_ids: &[String], outcomes: Vec<Result<()>>) -> BatchRecordResult {
    let (done, failed) = partition_outcomes(record_ids, outcomes);
    let failures = record_failures(failed, String::clone);
    BatchRecordResult {
        success_count: done.len(),
        failed_count: failures.len(),
        failures,
    }
}
