//! 火山引擎 HTTP 请求
//!
//! `List*` / `Query*` 为 GET，参数放在 query string；其余动作为 POST，参数放在 JSON body。
//! `Action` 与 `Version` 始终在 query string 中。

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, excerpt};
use crate::providers::common::query_params;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::VOLCENGINE_DNS_VERSION;
use super::session::HttpVolcengineSession;
use super::sign::canonical_query_string;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_read_action(action: &str) -> bool {
    action.starts_with("List") || action.starts_with("Query")
}

impl HttpVolcengineSession {
    fn serialization_error(&self, e: &serde_json::Error) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        }
    }

    /// 执行一次火山引擎 API 调用，返回 `Result` 字段
    pub(crate) async fn invoke<I: Serialize, O: DeserializeOwned>(
        &self,
        action: &'static str,
        input: &I,
        ctx: ErrorContext,
    ) -> Result<O> {
        let mut query = BTreeMap::new();
        query.insert("Action".to_string(), action.to_string());
        query.insert("Version".to_string(), VOLCENGINE_DNS_VERSION.to_string());

        let (method, content_type, body) = if is_read_action(action) {
            query.extend(query_params(input, self.provider_name())?);
            ("GET", FORM_CONTENT_TYPE, Vec::new())
        } else {
            let body = serde_json::to_vec(input).map_err(|e| self.serialization_error(&e))?;
            ("POST", JSON_CONTENT_TYPE, body)
        };

        let signed = self.sign(method, &query, content_type, &body, Utc::now())?;
        let url = format!("{}/?{}", self.endpoint, canonical_query_string(&query));

        let builder = if method == "GET" {
            self.client.get(&url)
        } else {
            self.client.post(&url).body(body)
        };
        let builder = builder
            .header("Content-Type", content_type)
            .header("X-Date", &signed.x_date)
            .header("X-Content-Sha256", &signed.content_sha256)
            .header("Authorization", &signed.authorization);

        let (status, response_text) =
            HttpUtils::execute_request(builder, self.provider_name(), method, action).await?;

        HttpUtils::ensure_json_body(&response_text, status, self.provider_name())?;
        let mut value: serde_json::Value =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        // {"ResponseMetadata": {"Error": {"Code": "...", "Message": "..."}}}
        if let Some(error) = value
            .get("ResponseMetadata")
            .and_then(|m| m.get("Error"))
            .filter(|e| !e.is_null())
        {
            let code = error.get("Code").and_then(|v| v.as_str()).unwrap_or_default();
            let message = error
                .get("Message")
                .and_then(|v| v.as_str())
                .unwrap_or(code);
            let raw = if code.is_empty() {
                RawApiError::new(message)
            } else {
                RawApiError::with_code(code, message)
            };
            return Err(self.map_error(raw, ctx));
        }

        if status >= 400 {
            return Err(self.protocol_error(
                format!("HTTP {status} without error metadata"),
                excerpt(&response_text),
            ));
        }

        // 删除等动作没有 Result 字段
        let result = match value.get_mut("Result").map(serde_json::Value::take) {
            Some(serde_json::Value::Null) | None => serde_json::json!({}),
            Some(result) => result,
        };

        serde_json::from_value(result).map_err(|e| {
            self.protocol_error(
                format!("unexpected {action} response: {e}"),
                excerpt(&response_text),
            )
        })
    }
}
