//! `DNSPod` DnsProvider trait 实现

use std::any::Any;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderDomain, ProviderKind, RecordStatus,
    UpdateRecordRequest, normalize_ttl,
};

use super::http::{FormParams, domain_param};
use super::types::{
    DnspodDomain, DnspodRecord, DomainInfoResponse, DomainListResponse, EmptyResponse,
    RecordListResponse, RecordResponse, line_from_native, line_to_native, status_from_native,
    status_to_native,
};
use super::{DEFAULT_MX_PRIORITY, DnspodProvider, MAX_RECORD_LENGTH};

impl DnspodProvider {
    fn convert_record(record: DnspodRecord, domain_id: &str) -> DnsRecord {
        let priority = record
            .mx
            .as_deref()
            .and_then(|mx| mx.parse::<i64>().ok())
            .filter(|mx| *mx > 0);
        DnsRecord {
            id: record.id,
            domain_id: domain_id.to_string(),
            name: record.name,
            record_type: DnsRecordType::from(record.record_type),
            value: record.value,
            ttl: normalize_ttl(&record.ttl),
            line: line_from_native(&record.line),
            status: Some(status_from_native(&record.enabled, &record.status)),
            remark: record.remark,
            priority,
        }
    }

    /// `Record.Create` / `Record.Modify` 共用的记录字段
    fn record_form(req: &CreateRecordRequest) -> FormParams {
        let mut form = vec![
            domain_param(&req.domain_id),
            ("sub_domain", req.name.clone()),
            ("record_type", req.record_type.to_string()),
            ("record_line", line_to_native(&req.line)),
            ("value", req.value.clone()),
            ("ttl", req.ttl.to_string()),
        ];
        if let Some(mx) = Self::mx_priority(req) {
            form.push(("mx", mx.to_string()));
        }
        form
    }

    /// 实际提交的 `mx`：只有 MX 记录带，缺省为 10
    fn mx_priority(req: &CreateRecordRequest) -> Option<i64> {
        (req.record_type == DnsRecordType::Mx)
            .then(|| req.priority.unwrap_or(DEFAULT_MX_PRIORITY))
    }

    fn record_from_response(response: RecordResponse, req: &CreateRecordRequest) -> DnsRecord {
        DnsRecord {
            id: response.record.id,
            domain_id: req.domain_id.clone(),
            name: req.name.clone(),
            record_type: req.record_type.clone(),
            value: req.value.clone(),
            ttl: req.ttl,
            line: req.line.clone(),
            status: Some(status_from_native("", &response.record.status)),
            // 创建/修改接口不接受备注
            remark: String::new(),
            priority: Self::mx_priority(req),
        }
    }

    /// `DNSPod`-specific domain metadata (`Domain.Info`): grade, owner, status and
    /// verification state. Accepts a numeric domain ID or a domain name.
    pub async fn domain_details(&self, domain_id: &str) -> Result<DnspodDomain> {
        let response: DomainInfoResponse = self
            .request(
                vec![domain_param(domain_id)],
                ErrorContext::action("Domain.Info").domain(domain_id),
            )
            .await?;
        Ok(response.domain)
    }
}

#[async_trait]
impl DnsProvider for DnspodProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Dnspod
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn list_domains(&self, keyword: Option<&str>) -> Result<Vec<ProviderDomain>> {
        let mut form: FormParams = vec![("type", "all".to_string())];
        if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
            form.push(("keyword", keyword.to_string()));
        }

        let response: DomainListResponse = self
            .request(form, ErrorContext::action("Domain.List"))
            .await?;

        Ok(response
            .domains
            .into_iter()
            .map(|d| ProviderDomain {
                record_count: d.records.as_deref().and_then(|r| r.parse().ok()),
                id: d.id,
                name: d.name,
                provider: ProviderKind::Dnspod,
            })
            .collect())
    }

    async fn list_records(
        &self,
        domain_id: &str,
        subdomain: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        let mut form: FormParams = vec![
            domain_param(domain_id),
            ("length", MAX_RECORD_LENGTH.to_string()),
            // 空列表时返回 code 1 而不是 10
            ("error_on_empty", "no".to_string()),
        ];
        if let Some(sub) = subdomain.map(str::trim).filter(|s| !s.is_empty()) {
            form.push(("sub_domain", sub.to_string()));
        }

        let response: RecordListResponse = self
            .request(
                form,
                ErrorContext::action("Record.List").domain(domain_id),
            )
            .await?;

        Ok(response
            .records
            .into_iter()
            .map(|r| Self::convert_record(r, domain_id))
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord> {
        let response: RecordResponse = self
            .request(
                Self::record_form(req),
                ErrorContext::action("Record.Create").domain(&req.domain_id),
            )
            .await?;
        Ok(Self::record_from_response(response, req))
    }

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let mut form = Self::record_form(req);
        form.push(("record_id", record_id.to_string()));

        let response: RecordResponse = self
            .request(
                form,
                ErrorContext::action("Record.Modify")
                    .domain(&req.domain_id)
                    .record(record_id),
            )
            .await?;
        let mut record = Self::record_from_response(response, req);
        if record.id.is_empty() {
            record.id = record_id.to_string();
        }
        Ok(record)
    }

    async fn delete_record(&self, record_id: &str, domain_id: &str) -> Result<()> {
        let _: EmptyResponse = self
            .request(
                vec![domain_param(domain_id), ("record_id", record_id.to_string())],
                ErrorContext::action("Record.Remove")
                    .domain(domain_id)
                    .record(record_id),
            )
            .await?;
        Ok(())
    }

    async fn set_record_status(
        &self,
        record_id: &str,
        domain_id: &str,
        status: RecordStatus,
    ) -> Result<()> {
        let _: EmptyResponse = self
            .request(
                vec![
                    domain_param(domain_id),
                    ("record_id", record_id.to_string()),
                    ("status", status_to_native(status).to_string()),
                ],
                ErrorContext::action("Record.Status")
                    .domain(domain_id)
                    .record(record_id),
            )
            .await?;
        Ok(())
    }
}
