//! `DNSPod` HTTP 请求方法

use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, excerpt};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DnspodProvider;
use super::types::DnspodStatus;

/// 表单参数（不含 `login_token` / `format`）
pub(crate) type FormParams = Vec<(&'static str, String)>;

/// 数字 ID 走 `domain_id`，其余按域名走 `domain`
pub(crate) fn domain_param(domain_id: &str) -> (&'static str, String) {
    let domain_id = domain_id.trim().trim_end_matches('.');
    if !domain_id.is_empty() && domain_id.bytes().all(|b| b.is_ascii_digit()) {
        ("domain_id", domain_id.to_string())
    } else {
        ("domain", domain_id.to_string())
    }
}

impl DnspodProvider {
    /// 执行一次 `DNSPod` API 调用（表单 POST 到 `<endpoint>/<Action>`）
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        mut form: FormParams,
        ctx: ErrorContext,
    ) -> Result<T> {
        let action = ctx.action;
        let url = format!("{}/{action}", self.endpoint.trim_end_matches('/'));

        form.push(("login_token", self.login_token.clone()));
        form.push(("format", "json".to_string()));

        let request = self
            .client
            .post(&url)
            .header(
                USER_AGENT,
                concat!("dnsgate-provider/", env!("CARGO_PKG_VERSION")),
            )
            .form(&form);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", action).await?;

        // 未认证时网关会直接返回 HTML 错误页
        HttpUtils::ensure_json_body(&response_text, status, self.provider_name())?;
        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        let status_value = value.get("status").ok_or_else(|| {
            self.protocol_error("response has no status envelope", excerpt(&response_text))
        })?;
        let api_status = DnspodStatus::deserialize(status_value).map_err(|e| {
            self.protocol_error(
                format!("malformed status envelope: {e}"),
                excerpt(&response_text),
            )
        })?;

        if !api_status.is_success() {
            let message = if api_status.message.is_empty() {
                format!("error code {}", api_status.code)
            } else {
                api_status.message
            };
            return Err(self.map_error(RawApiError::with_code(api_status.code, message), ctx));
        }

        serde_json::from_value(value).map_err(|e| {
            self.protocol_error(
                format!("unexpected {action} response: {e}"),
                excerpt(&response_text),
            )
        })
    }
}
