//! 阿里云 HTTP 请求（RPC 风格：签名参数全部放在 query string 中）

use std::collections::BTreeMap;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, excerpt};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunProvider;

impl AliyunProvider {
    /// 执行一次阿里云 API 调用
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        params: BTreeMap<String, String>,
        ctx: ErrorContext,
    ) -> Result<T> {
        let action = ctx.action;
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        let query = self.signed_query(action, params, &timestamp, &nonce)?;
        let url = format!("{}/?{query}", self.endpoint.trim_end_matches('/'));

        let (status, response_text) = HttpUtils::execute_request(
            self.client.get(&url),
            self.provider_name(),
            "GET",
            action,
        )
        .await?;

        HttpUtils::ensure_json_body(&response_text, status, self.provider_name())?;
        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        // 错误响应：{"RequestId": "...", "Code": "...", "Message": "..."}，通常伴随 4xx
        if let Some(code) = value.get("Code").and_then(|v| v.as_str()) {
            let message = value
                .get("Message")
                .and_then(|v| v.as_str())
                .unwrap_or(code);
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        if status >= 400 {
            return Err(self.protocol_error(
                format!("HTTP {status} without error code"),
                excerpt(&response_text),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            self.protocol_error(
                format!("unexpected {action} response: {e}"),
                excerpt(&response_text),
            )
        })
    }
}
