//! 火山引擎 OpenAPI 签名（HMAC-SHA256）
//!
//! 参考: <https://www.volcengine.com/docs/6369/67269>

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::providers::common::{hmac_sha256, percent_encode, sha256_hex};

use super::session::HttpVolcengineSession;
use super::{VOLCENGINE_REQUEST_TYPE, VOLCENGINE_SERVICE};

pub(crate) const ALGORITHM: &str = "HMAC-SHA256";
pub(crate) const SIGNED_HEADERS: &str = "content-type;host;x-content-sha256;x-date";

/// 签名结果，原样写入请求头
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignedRequest {
    /// `X-Date`
    pub x_date: String,
    /// `X-Content-Sha256`
    pub content_sha256: String,
    /// `Authorization`
    pub authorization: String,
}

/// 规范化查询串：key 升序，key 与 value 各自 RFC3986 编码
pub(crate) fn canonical_query_string(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl HttpVolcengineSession {
    /// 计算一次请求的签名头
    pub(crate) fn sign(
        &self,
        method: &str,
        query: &BTreeMap<String, String>,
        content_type: &str,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<SignedRequest> {
        let x_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let short_date = now.format("%Y%m%d").to_string();
        let payload_hash = sha256_hex(payload);

        // 1. 规范请求
        let canonical_headers = format!(
            "content-type:{content_type}\nhost:{}\nx-content-sha256:{payload_hash}\nx-date:{x_date}\n",
            self.host
        );
        let canonical_request = format!(
            "{method}\n/\n{}\n{canonical_headers}\n{SIGNED_HEADERS}\n{payload_hash}",
            canonical_query_string(query)
        );

        // 2. 待签名字符串
        let credential_scope = format!(
            "{short_date}/{}/{VOLCENGINE_SERVICE}/{VOLCENGINE_REQUEST_TYPE}",
            self.region
        );
        let string_to_sign = format!(
            "{ALGORITHM}\n{x_date}\n{credential_scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );
        log::debug!("[volcengine] StringToSign: {string_to_sign}");

        // 3. 派生签名密钥
        let k_date = hmac_sha256(
            self.secret_access_key.as_bytes(),
            short_date.as_bytes(),
            "volcengine",
        )?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes(), "volcengine")?;
        let k_service = hmac_sha256(&k_region, VOLCENGINE_SERVICE.as_bytes(), "volcengine")?;
        let k_signing = hmac_sha256(&k_service, VOLCENGINE_REQUEST_TYPE.as_bytes(), "volcengine")?;
        let signature = hex::encode(hmac_sha256(
            &k_signing,
            string_to_sign.as_bytes(),
            "volcengine",
        )?);

        // 4. Authorization
        Ok(SignedRequest {
            x_date,
            content_sha256: payload_hash,
            authorization: format!(
                "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
                self.access_key_id
            ),
        })
    }
}
