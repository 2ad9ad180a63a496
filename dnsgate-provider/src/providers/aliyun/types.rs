//! 阿里云 API 类型定义和辅助函数

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::providers::common::query_params;
use crate::types::RecordStatus;
use crate::utils::serde_helpers::{null_as_default, string_or_number};

/// 将请求结构体展平为按 key 排序的参数表（不含公共参数）
pub fn to_param_map<T: Serialize>(params: &T) -> Result<BTreeMap<String, String>> {
    query_params(params, "aliyun")
}

// ============ 状态映射 ============

/// `ENABLE` / `DISABLE`
pub fn status_to_native(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Enable => "ENABLE",
        RecordStatus::Disable => "DISABLE",
    }
}

/// 只有 `DISABLE` 视为暂停，其余（含缺省）视为启用
pub fn status_from_native(status: &str) -> RecordStatus {
    if status.eq_ignore_ascii_case("DISABLE") {
        RecordStatus::Disable
    } else {
        RecordStatus::Enable
    }
}

// ============ 请求结构 ============

#[derive(Debug, Serialize)]
pub struct DescribeDomainsRequest {
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
    #[serde(rename = "KeyWord", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescribeDomainInfoRequest {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
}

#[derive(Debug, Serialize)]
pub struct DescribeDomainRecordsRequest {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
    /// 主机记录关键字
    #[serde(rename = "RRKeyWord", skip_serializing_if = "Option::is_none")]
    pub rr_keyword: Option<String>,
}

/// `AddDomainRecord` 与 `UpdateDomainRecord` 共用，二者只差定位字段
#[derive(Debug, Serialize)]
pub struct RecordWriteRequest {
    #[serde(rename = "DomainName", skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(rename = "RecordId", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: i64,
    #[serde(rename = "Line")]
    pub line: String,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecordIdRequest {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

#[derive(Debug, Serialize)]
pub struct SetDomainRecordStatusRequest {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "Status")]
    pub status: &'static str,
}

// ============ 域名相关结构 ============

#[derive(Debug, Deserialize)]
pub struct DescribeDomainsResponse {
    #[serde(rename = "Domains")]
    pub domains: Option<DomainsWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct DomainsWrapper {
    #[serde(rename = "Domain")]
    pub domain: Option<Vec<AliyunDomain>>,
}

/// 域名条目；`DescribeDomainInfo` 返回同样的字段（外层没有包装）
#[derive(Debug, Clone, Deserialize)]
pub struct AliyunDomain {
    #[serde(rename = "DomainId", default, deserialize_with = "string_or_number")]
    pub domain_id: String,
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "PunyCode", default, deserialize_with = "null_as_default")]
    pub puny_code: String,
    #[serde(rename = "Remark", default, deserialize_with = "null_as_default")]
    pub remark: String,
    #[serde(rename = "RecordCount")]
    pub record_count: Option<u32>,
}

// ============ 记录相关结构 ============

#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsWrapper>,
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AliyunRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct AliyunRecord {
    #[serde(rename = "RecordId", deserialize_with = "string_or_number")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: i64,
    #[serde(rename = "Line", default, deserialize_with = "null_as_default")]
    pub line: String,
    #[serde(rename = "Status", default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "Remark", default, deserialize_with = "null_as_default")]
    pub remark: String,
    #[serde(rename = "Priority")]
    pub priority: Option<i64>,
}

/// `AddDomainRecord` / `UpdateDomainRecord` 响应
#[derive(Debug, Deserialize)]
pub struct RecordIdResponse {
    #[serde(rename = "RecordId", deserialize_with = "string_or_number")]
    pub record_id: String,
}

/// 只关心调用是否成功的响应
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}
