//! Provider 公共工具函数

use std::collections::BTreeMap;
use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, Result};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// 创建带超时配置的 HTTP Client
///
/// `request_timeout_secs` 为整个请求（含读取响应体）的上限，连接超时不超过它。
pub fn create_http_client(provider: &str, request_timeout_secs: u64) -> Result<Client> {
    let total = request_timeout_secs.max(1);
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS.min(total)))
        .timeout(Duration::from_secs(total))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ HMAC / Digest ============

fn invalid_key(provider: &str) -> ProviderError {
    ProviderError::SerializationError {
        provider: provider.to_string(),
        detail: "invalid HMAC key".to_string(),
    }
}

/// HMAC-SHA1（aliyun RPC 签名）
pub fn hmac_sha1(key: &[u8], data: &[u8], provider: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha1::new_from_slice(key).map_err(|_| invalid_key(provider))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// HMAC-SHA256（volcengine 签名）
pub fn hmac_sha256(key: &[u8], data: &[u8], provider: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| invalid_key(provider))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// SHA256 十六进制摘要
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// ============ URL 编码 ============

/// RFC3986 百分号编码
///
/// 只保留 `A-Z a-z 0-9 - _ . ~`，空格编码为 `%20`，`*` 编码为 `%2A`。
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

// ============ 请求参数 ============

/// 把请求结构体序列化为按 key 排序的 query 参数
///
/// `None` 字段被跳过；嵌套对象用 `Parent.Child`，数组用从 1 开始的 `Name.N`。
pub fn query_params<T: Serialize>(input: &T, provider: &str) -> Result<BTreeMap<String, String>> {
    let value = serde_json::to_value(input).map_err(|e| ProviderError::SerializationError {
        provider: provider.to_string(),
        detail: e.to_string(),
    })?;

    let mut params = BTreeMap::new();
    let mut pending: Vec<(String, Value)> = match value {
        Value::Object(fields) => fields.into_iter().collect(),
        Value::Null => Vec::new(),
        other => vec![(String::new(), other)],
    };
    while let Some((key, value)) = pending.pop() {
        match value {
            Value::Null => {}
            Value::String(s) => {
                params.insert(key, s);
            }
            Value::Bool(_) | Value::Number(_) => {
                params.insert(key, value.to_string());
            }
            Value::Array(items) => pending.extend(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (format!("{key}.{}", i + 1), item)),
            ),
            Value::Object(fields) => pending.extend(
                fields
                    .into_iter()
                    .map(|(name, item)| (format!("{key}.{name}"), item)),
            ),
        }
    }
    Ok(params)
}

// ============ 域名名称处理 ============

/// 去掉域名首尾空白和末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_string()
}
