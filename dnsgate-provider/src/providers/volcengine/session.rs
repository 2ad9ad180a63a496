//! 火山引擎 DNS 会话
//!
//! [`VolcengineSession`] mirrors the vendor SDK client: one method per API action,
//! nullable SDK-shaped inputs and outputs, and a single round trip per call.
//! [`HttpVolcengineSession`] is the signed-HTTP implementation used in production.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::traits::ErrorContext;
use crate::types::{DEFAULT_REQUEST_TIMEOUT_SECS, VolcengineCredentials};

use super::types::{
    CreateRecordInput, CreateRecordOutput, DeleteRecordInput, DeleteRecordOutput,
    ListRecordsInput, ListRecordsOutput, ListZonesInput, ListZonesOutput, QueryZoneInput,
    UpdateRecordInput, UpdateRecordOutput, UpdateRecordStatusInput, UpdateRecordStatusOutput,
    ZoneInfo,
};
use super::{DEFAULT_REGION, VOLCENGINE_DNS_ENDPOINT};

/// SDK-style Volcengine DNS client.
///
/// Errors reported in the response metadata surface as
/// [`ProviderError::ProviderApiError`] with the vendor message verbatim.
#[async_trait]
pub trait VolcengineSession: Send + Sync {
    async fn list_zones(&self, input: ListZonesInput) -> Result<ListZonesOutput>;

    async fn query_zone(&self, input: QueryZoneInput) -> Result<ZoneInfo>;

    async fn list_records(&self, input: ListRecordsInput) -> Result<ListRecordsOutput>;

    async fn create_record(&self, input: CreateRecordInput) -> Result<CreateRecordOutput>;

    async fn update_record(&self, input: UpdateRecordInput) -> Result<UpdateRecordOutput>;

    async fn delete_record(&self, input: DeleteRecordInput) -> Result<DeleteRecordOutput>;

    async fn update_record_status(
        &self,
        input: UpdateRecordStatusInput,
    ) -> Result<UpdateRecordStatusOutput>;
}

/// Signed-HTTP [`VolcengineSession`] against the Volcengine OpenAPI gateway.
pub struct HttpVolcengineSession {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) region: String,
    /// 不带末尾 `/` 的 endpoint
    pub(crate) endpoint: String,
    /// 参与签名的 `host` 头（非默认端口时带端口）
    pub(crate) host: String,
}

/// Builder for [`HttpVolcengineSession`].
pub struct HttpVolcengineSessionBuilder {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    endpoint: String,
    timeout_secs: u64,
}

impl HttpVolcengineSessionBuilder {
    /// Region (default: `cn-north-1`).
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Override the OpenAPI endpoint (default: `https://open.volcengineapi.com`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Per-request timeout in seconds (default: 10).
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the session. Fails if the endpoint is not an absolute URL.
    pub fn build(self) -> Result<HttpVolcengineSession> {
        let invalid_endpoint = |detail: String| ProviderError::InvalidParameter {
            provider: "volcengine".to_string(),
            param: "endpoint".to_string(),
            detail,
        };
        let url = Url::parse(&self.endpoint).map_err(|e| invalid_endpoint(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| invalid_endpoint(format!("no host in {}", self.endpoint)))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(HttpVolcengineSession {
            client: create_http_client("volcengine", self.timeout_secs)?,
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            region: self.region,
            endpoint: self.endpoint.trim_end_matches('/').to_string(),
            host,
        })
    }
}

impl HttpVolcengineSession {
    /// Returns a builder for customizing the session configuration.
    pub fn builder(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> HttpVolcengineSessionBuilder {
        HttpVolcengineSessionBuilder {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: DEFAULT_REGION.to_string(),
            endpoint: VOLCENGINE_DNS_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Creates a session from a credential bundle.
    pub fn from_credentials(creds: &VolcengineCredentials, timeout_secs: u64) -> Result<Self> {
        let mut builder = Self::builder(&creds.access_key_id, &creds.secret_access_key)
            .region(&creds.region)
            .timeout_secs(timeout_secs);
        if let Some(endpoint) = &creds.endpoint {
            builder = builder.endpoint(endpoint);
        }
        builder.build()
    }
}

#[async_trait]
impl VolcengineSession for HttpVolcengineSession {
    async fn list_zones(&self, input: ListZonesInput) -> Result<ListZonesOutput> {
        self.invoke("ListZones", &input, ErrorContext::action("ListZones"))
            .await
    }

    async fn query_zone(&self, input: QueryZoneInput) -> Result<ZoneInfo> {
        let ctx = ErrorContext::action("QueryZone").domain(zid_label(input.zid));
        self.invoke("QueryZone", &input, ctx).await
    }

    async fn list_records(&self, input: ListRecordsInput) -> Result<ListRecordsOutput> {
        let ctx = ErrorContext::action("ListRecords").domain(zid_label(input.zid));
        self.invoke("ListRecords", &input, ctx).await
    }

    async fn create_record(&self, input: CreateRecordInput) -> Result<CreateRecordOutput> {
        let ctx = ErrorContext::action("CreateRecord").domain(zid_label(input.zid));
        self.invoke("CreateRecord", &input, ctx).await
    }

    async fn update_record(&self, input: UpdateRecordInput) -> Result<UpdateRecordOutput> {
        let ctx = ErrorContext::action("UpdateRecord")
            .record(input.record_id.clone().unwrap_or_default());
        self.invoke("UpdateRecord", &input, ctx).await
    }

    async fn delete_record(&self, input: DeleteRecordInput) -> Result<DeleteRecordOutput> {
        let ctx = ErrorContext::action("DeleteRecord")
            .record(input.record_id.clone().unwrap_or_default());
        self.invoke("DeleteRecord", &input, ctx).await
    }

    async fn update_record_status(
        &self,
        input: UpdateRecordStatusInput,
    ) -> Result<UpdateRecordStatusOutput> {
        let ctx = ErrorContext::action("UpdateRecordStatus")
            .record(input.record_id.clone().unwrap_or_default());
        self.invoke("UpdateRecordStatus", &input, ctx).await
    }
}

fn zid_label(zid: Option<i64>) -> String {
    zid.map(|z| z.to_string()).unwrap_or_default()
}
