//! `DNSPod` 旧版 API（dnsapi.cn）类型定义

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_LINE, RecordStatus};
use crate::utils::serde_helpers::{null_as_default, opt_string_or_number, string_or_number};

/// `DNSPod` 原生默认线路
pub const NATIVE_DEFAULT_LINE: &str = "默认";

/// 统一线路名 -> `DNSPod` 线路名
pub fn line_to_native(line: &str) -> String {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case(DEFAULT_LINE) {
        NATIVE_DEFAULT_LINE.to_string()
    } else {
        line.to_string()
    }
}

/// `DNSPod` 线路名 -> 统一线路名
pub fn line_from_native(line: &str) -> String {
    if line.is_empty() || line == NATIVE_DEFAULT_LINE {
        DEFAULT_LINE.to_string()
    } else {
        line.to_string()
    }
}

/// `Record.Status` 的 `status` 参数
pub fn status_to_native(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Enable => "enable",
        RecordStatus::Disable => "disable",
    }
}

/// 优先看 `enabled`（"1"/"0"），缺省时退回 `status` 字段
pub fn status_from_native(enabled: &str, status: &str) -> RecordStatus {
    match enabled {
        "1" => RecordStatus::Enable,
        "0" => RecordStatus::Disable,
        _ if status.to_ascii_lowercase().starts_with("disable")
            || status.eq_ignore_ascii_case("pause") =>
        {
            RecordStatus::Disable
        }
        _ => RecordStatus::Enable,
    }
}

// ============ 通用响应 ============

/// 每个响应都带的 `status` 段，`code == "1"` 表示成功
#[derive(Debug, Deserialize)]
pub struct DnspodStatus {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl DnspodStatus {
    pub fn is_success(&self) -> bool {
        self.code == "1"
    }
}

// ============ 域名 ============

#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<DnspodDomain>,
}

#[derive(Debug, Deserialize)]
pub struct DomainInfoResponse {
    pub domain: DnspodDomain,
}

/// `DNSPod` domain metadata as returned by `Domain.List` / `Domain.Info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnspodDomain {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Service grade (`DP_Free`, `DP_Plus`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub grade: String,
    /// Owner account e-mail.
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    /// `enable` / `pause` / `spam` / `lock`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Extra verification state (`notexist`, `dnserror`, empty when fine).
    #[serde(default, deserialize_with = "null_as_default")]
    pub ext_status: String,
    /// Record count, sent as a string by the API.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub records: Option<String>,
}

// ============ 记录 ============

#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<DnspodRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DnspodRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ttl: String,
    pub value: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub mx: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub enabled: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remark: String,
}

/// `Record.Create` / `Record.Modify` 响应
#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    pub record: RecordRef,
}

#[derive(Debug, Deserialize)]
pub struct RecordRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// 只关心 `status` 的响应
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}
