//! 阿里云 RPC 签名（HMAC-SHA1，SignatureVersion 1.0）
//!
//! 参考: <https://help.aliyun.com/document_detail/29747.html>

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::Result;
use crate::providers::common::{hmac_sha1, percent_encode};

use super::{ALIYUN_DNS_VERSION, AliyunProvider};

pub(crate) const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub(crate) const SIGNATURE_VERSION: &str = "1.0";

/// 规范化请求字符串：key 按字节序升序，key 与 value 各自做 RFC3986 编码
pub(crate) fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `GET&%2F&<percentEncode(canonical)>`
pub(crate) fn string_to_sign(canonical: &str) -> String {
    format!("GET&{}&{}", percent_encode("/"), percent_encode(canonical))
}

/// `base64(HMAC-SHA1(secret + "&", string_to_sign))`
pub(crate) fn compute_signature(access_key_secret: &str, string_to_sign: &str) -> Result<String> {
    let key = format!("{access_key_secret}&");
    let digest = hmac_sha1(key.as_bytes(), string_to_sign.as_bytes(), "aliyun")?;
    Ok(BASE64.encode(digest))
}

/// 对完整参数表签名，返回带 `Signature` 的最终 query string
pub(crate) fn sign_params(
    mut params: BTreeMap<String, String>,
    access_key_secret: &str,
) -> Result<String> {
    let canonical = canonical_query_string(&params);
    let to_sign = string_to_sign(&canonical);
    log::debug!("[aliyun] StringToSign: {to_sign}");

    let signature = compute_signature(access_key_secret, &to_sign)?;
    params.insert("Signature".to_string(), signature);
    Ok(canonical_query_string(&params))
}

impl AliyunProvider {
    /// 合并业务参数与公共参数后签名
    pub(crate) fn signed_query(
        &self,
        action: &str,
        mut params: BTreeMap<String, String>,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String> {
        let public = [
            ("Action", action),
            ("Format", "JSON"),
            ("Version", ALIYUN_DNS_VERSION),
            ("AccessKeyId", self.access_key_id.as_str()),
            ("SignatureMethod", SIGNATURE_METHOD),
            ("SignatureVersion", SIGNATURE_VERSION),
            ("SignatureNonce", nonce),
            ("Timestamp", timestamp),
            ("RegionId", self.region_id.as_str()),
        ];
        for (k, v) in public {
            params.insert(k.to_string(), v.to_string());
        }
        sign_params(params, &self.access_key_secret)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::providers::aliyun::AliyunProvider;

    /// 阿里云文档中的签名示例参数
    fn documented_params() -> BTreeMap<String, String> {
        [
            ("AccessKeyId", "testid"),
            ("Action", "DescribeDomainRecords"),
            ("DomainName", "example.com"),
            ("Format", "XML"),
            ("SignatureMethod", "HMAC-SHA1"),
            ("SignatureNonce", "f59ed6a9-83fc-473b-9cc6-99c95df3856e"),
            ("SignatureVersion", "1.0"),
            ("Timestamp", "2016-03-24T16:41:54Z"),
            ("Version", "2015-01-09"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn string_to_sign_matches_documented_example() {
        let canonical = canonical_query_string(&documented_params());
        assert_eq!(
            string_to_sign(&canonical),
            "GET&%2F&AccessKeyId%3Dtestid%26Action%3DDescribeDomainRecords\
             %26DomainName%3Dexample.com%26Format%3DXML%26SignatureMethod%3DHMAC-SHA1\
             %26SignatureNonce%3Df59ed6a9-83fc-473b-9cc6-99c95df3856e\
             %26SignatureVersion%3D1.0%26Timestamp%3D2016-03-24T16%253A41%253A54Z\
             %26Version%3D2015-01-09"
        );
    }

    #[test]
    fn signature_matches_documented_example() {
        let canonical = canonical_query_string(&documented_params());
        let signature = compute_signature("testsecret", &string_to_sign(&canonical)).unwrap();
        assert_eq!(signature, "uRpHwaSEt3J+6KQD//svCh/x+pI=");
    }

    #[test]
    fn final_query_carries_encoded_signature() {
        let query = sign_params(documented_params(), "testsecret").unwrap();
        assert!(
            query.contains("&Signature=uRpHwaSEt3J%2B6KQD%2F%2FsvCh%2Fx%2BpI%3D&"),
            "unexpected query: {query}"
        );
        // Signature 按字节序排在 SignatureMethod 之前
        let sig = query.find("Signature=").unwrap();
        let method = query.find("SignatureMethod=").unwrap();
        assert!(sig < method);
    }

    #[test]
    fn space_encoded_as_percent_20() {
        let params: BTreeMap<String, String> =
            [("Remark".to_string(), "a b*c".to_string())].into();
        assert_eq!(canonical_query_string(&params), "Remark=a%20b%2Ac");
    }

    #[test]
    fn keys_sorted_bytewise() {
        let params: BTreeMap<String, String> = [("b", "1"), ("B", "2"), ("a", "3")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(canonical_query_string(&params), "B=2&a=3&b=1");
    }

    #[test]
    fn signed_query_deterministic() {
        let provider = AliyunProvider::builder("key-id", "key-secret").build().unwrap();
        let params: BTreeMap<String, String> =
            [("DomainName".to_string(), "example.com".to_string())].into();
        let a = provider
            .signed_query("DescribeDomainRecords", params.clone(), "2024-01-15T08:00:00Z", "n-1")
            .unwrap();
        let b = provider
            .signed_query("DescribeDomainRecords", params, "2024-01-15T08:00:00Z", "n-1")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signed_query_has_public_params() {
        let provider = AliyunProvider::builder("key-id", "key-secret")
            .region_id("cn-shanghai")
            .build()
            .unwrap();
        let query = provider
            .signed_query("DescribeDomains", BTreeMap::new(), "2024-01-15T08:00:00Z", "n-1")
            .unwrap();
        for expected in [
            "AccessKeyId=key-id",
            "Action=DescribeDomains",
            "Format=JSON",
            "RegionId=cn-shanghai",
            "SignatureMethod=HMAC-SHA1",
            "SignatureNonce=n-1",
            "SignatureVersion=1.0",
            "Timestamp=2024-01-15T08%3A00%3A00Z",
            "Version=2015-01-09",
        ] {
            assert!(query.contains(expected), "missing {expected} in {query}");
        }
    }

    #[test]
    fn different_secret_changes_signature() {
        let canonical = canonical_query_string(&documented_params());
        let to_sign = string_to_sign(&canonical);
        assert_ne!(
            compute_signature("secret-one", &to_sign).unwrap(),
            compute_signature("secret-two", &to_sign).unwrap()
        );
    }
}
