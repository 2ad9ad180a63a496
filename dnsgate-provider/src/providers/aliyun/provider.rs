//! 阿里云 DnsProvider trait 实现

use std::any::Any;

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{
    CreateRecordRequest, DEFAULT_LINE, DnsRecord, DnsRecordType, ProviderDomain, ProviderKind,
    RecordStatus, UpdateRecordRequest,
};

use super::types::{
    AliyunDomain, AliyunRecord, DescribeDomainInfoRequest, DescribeDomainRecordsRequest,
    DescribeDomainRecordsResponse, DescribeDomainsRequest, DescribeDomainsResponse,
    EmptyResponse, RecordIdRequest, RecordIdResponse, RecordWriteRequest,
    SetDomainRecordStatusRequest, status_from_native, status_to_native, to_param_map,
};
use super::{AliyunProvider, MAX_DOMAIN_PAGE_SIZE, MAX_RECORD_PAGE_SIZE};

impl AliyunProvider {
    fn convert_record(record: AliyunRecord, domain_id: &str) -> DnsRecord {
        DnsRecord {
            id: record.record_id,
            domain_id: domain_id.to_string(),
            name: record.rr,
            record_type: DnsRecordType::from(record.record_type),
            value: record.value,
            ttl: record.ttl,
            line: if record.line.is_empty() {
                DEFAULT_LINE.to_string()
            } else {
                record.line
            },
            status: Some(status_from_native(&record.status)),
            remark: record.remark,
            priority: record.priority,
        }
    }

    fn write_request(req: &CreateRecordRequest) -> RecordWriteRequest {
        RecordWriteRequest {
            domain_name: None,
            record_id: None,
            rr: req.name.clone(),
            record_type: req.record_type.to_string(),
            value: req.value.clone(),
            ttl: req.ttl,
            line: req.line.clone(),
            priority: req.priority.filter(|_| req.record_type == DnsRecordType::Mx),
        }
    }

    fn record_from_request(
        id: String,
        req: &CreateRecordRequest,
        status: Option<RecordStatus>,
    ) -> DnsRecord {
        DnsRecord {
            id,
            domain_id: req.domain_id.clone(),
            name: req.name.clone(),
            record_type: req.record_type.clone(),
            value: req.value.clone(),
            ttl: req.ttl,
            line: req.line.clone(),
            status,
            // AddDomainRecord / UpdateDomainRecord 不接受备注
            remark: String::new(),
            priority: req.priority,
        }
    }

    /// Aliyun-specific domain metadata (`DescribeDomainInfo`): domain ID, punycode,
    /// remark and record count.
    pub async fn domain_details(&self, domain_name: &str) -> Result<AliyunDomain> {
        let domain_name = normalize_domain_name(domain_name);
        let params = to_param_map(&DescribeDomainInfoRequest {
            domain_name: domain_name.clone(),
        })?;
        self.request(
            params,
            ErrorContext::action("DescribeDomainInfo").domain(domain_name),
        )
        .await
    }
}

#[async_trait]
impl DnsProvider for AliyunProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Aliyun
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn list_domains(&self, keyword: Option<&str>) -> Result<Vec<ProviderDomain>> {
        let params = to_param_map(&DescribeDomainsRequest {
            page_number: 1,
            page_size: MAX_DOMAIN_PAGE_SIZE,
            keyword: keyword.map(str::trim).filter(|k| !k.is_empty()).map(String::from),
        })?;

        let response: DescribeDomainsResponse = self
            .request(params, ErrorContext::action("DescribeDomains"))
            .await?;

        Ok(response
            .domains
            .and_then(|d| d.domain)
            .unwrap_or_default()
            .into_iter()
            .map(|d| ProviderDomain {
                // 阿里云记录接口按域名寻址，统一以域名作为 ID
                id: d.domain_name.clone(),
                name: d.domain_name,
                provider: ProviderKind::Aliyun,
                record_count: d.record_count,
            })
            .collect())
    }

    async fn list_records(
        &self,
        domain_id: &str,
        subdomain: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        let domain_name = normalize_domain_name(domain_id);
        let params = to_param_map(&DescribeDomainRecordsRequest {
            domain_name: domain_name.clone(),
            page_number: 1,
            page_size: MAX_RECORD_PAGE_SIZE,
            rr_keyword: subdomain
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
        })?;

        let response: DescribeDomainRecordsResponse = self
            .request(
                params,
                ErrorContext::action("DescribeDomainRecords").domain(&domain_name),
            )
            .await?;

        Ok(response
            .domain_records
            .and_then(|r| r.record)
            .unwrap_or_default()
            .into_iter()
            .map(|r| Self::convert_record(r, domain_id))
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord> {
        let domain_name = normalize_domain_name(&req.domain_id);
        let mut api_req = Self::write_request(req);
        api_req.domain_name = Some(domain_name.clone());

        let response: RecordIdResponse = self
            .request(
                to_param_map(&api_req)?,
                ErrorContext::action("AddDomainRecord").domain(domain_name),
            )
            .await?;

        // 新建记录总是启用状态
        Ok(Self::record_from_request(
            response.record_id,
            req,
            Some(RecordStatus::Enable),
        ))
    }

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let mut api_req = Self::write_request(req);
        api_req.record_id = Some(record_id.to_string());

        let response: RecordIdResponse = self
            .request(
                to_param_map(&api_req)?,
                ErrorContext::action("UpdateDomainRecord")
                    .domain(&req.domain_id)
                    .record(record_id),
            )
            .await?;

        // UpdateDomainRecord 不改变也不返回记录状态
        Ok(Self::record_from_request(response.record_id, req, None))
    }

    async fn delete_record(&self, record_id: &str, domain_id: &str) -> Result<()> {
        let params = to_param_map(&RecordIdRequest {
            record_id: record_id.to_string(),
        })?;

        let _: EmptyResponse = self
            .request(
                params,
                ErrorContext::action("DeleteDomainRecord")
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
        let params = to_param_map(&SetDomainRecordStatusRequest {
            record_id: record_id.to_string(),
            status: status_to_native(status),
        })?;

        let _: EmptyResponse = self
            .request(
                params,
                ErrorContext::action("SetDomainRecordStatus")
                    .domain(domain_id)
                    .record(record_id),
            )
            .await?;
        Ok(())
    }
}
