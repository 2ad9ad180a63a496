//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dnsgate_provider::volcengine::{
    CreateRecordInput, CreateRecordOutput, DeleteRecordInput, DeleteRecordOutput,
    HttpVolcengineSession, ListRecordsInput, ListRecordsOutput, ListZonesInput, ListZonesOutput,
    QueryZoneInput, RecordOutput, UpdateRecordInput, UpdateRecordOutput, UpdateRecordStatusInput,
    UpdateRecordStatusOutput, VolcengineSession, ZoneInfo,
};
use dnsgate_provider::{
    AliyunCredentials, AliyunProvider, CreateRecordRequest, DnsProvider, DnsRecord,
    DnspodCredentials, DnspodProvider, ProviderCredentials, ProviderError, ProviderKind,
    VolcengineCredentials, create_provider,
};
use serde::Serialize;
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
///
/// 只要求错误类型实现 `Display`，`Ok` 值可以是没有 `Debug` 的 provider / manager。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("expected Ok(..), got Err({e})"),
        }
    }};
    ($expr:expr, $($msg:tt)+) => {{
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("{}: Err({e})", format_args!($($msg)+)),
        }
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Mock server 上的 Provider ============

pub fn dnspod_provider(server: &MockServer) -> DnspodProvider {
    DnspodProvider::builder("12345,test-token")
        .endpoint(server.uri())
        .build()
        .expect("build dnspod provider")
}

pub fn aliyun_provider(server: &MockServer) -> AliyunProvider {
    AliyunProvider::builder("test-key-id", "test-key-secret")
        .endpoint(format!("{}/", server.uri()))
        .build()
        .expect("build aliyun provider")
}

pub fn volcengine_session(server: &MockServer) -> HttpVolcengineSession {
    HttpVolcengineSession::builder("AKLTtest", "test-secret")
        .endpoint(server.uri())
        .build()
        .expect("build volcengine session")
}

/// 三个 Provider 的凭证都指向同一个 mock server
pub fn mock_credentials(server: &MockServer) -> ProviderCredentials {
    let mut dnspod = DnspodCredentials::new("12345,test-token");
    dnspod.endpoint = Some(server.uri());
    let mut aliyun = AliyunCredentials::new("test-key-id", "test-key-secret");
    aliyun.endpoint = Some(server.uri());
    let mut volcengine = VolcengineCredentials::new("AKLTtest", "test-secret");
    volcengine.endpoint = Some(server.uri());

    ProviderCredentials {
        dnspod: Some(dnspod),
        aliyun: Some(aliyun),
        volcengine: Some(volcengine),
        ..Default::default()
    }
}

// ============ Mock Volcengine session ============

/// 记录每次调用的 action 与入参，按预置数据应答
#[derive(Default)]
pub struct MockVolcengineSession {
    pub zones: Vec<ZoneInfo>,
    pub records: Vec<RecordOutput>,
    /// 预置的失败，所有调用都会返回它
    pub error: Option<ProviderError>,
    /// 已发生的调用，用 `..Default::default()` 留空
    pub calls: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl MockVolcengineSession {
    pub fn calls(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record<I: Serialize>(&self, action: &'static str, input: &I) -> Result<(), ProviderError> {
        let value = serde_json::to_value(input).expect("serialize input");
        self.calls.lock().expect("calls lock").push((action, value));
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VolcengineSession for MockVolcengineSession {
    async fn list_zones(&self, input: ListZonesInput) -> Result<ListZonesOutput, ProviderError> {
        self.record("ListZones", &input)?;
        Ok(ListZonesOutput {
            total: i32::try_from(self.zones.len()).ok(),
            zones: Some(self.zones.clone()),
        })
    }

    async fn query_zone(&self, input: QueryZoneInput) -> Result<ZoneInfo, ProviderError> {
        self.record("QueryZone", &input)?;
        Ok(self
            .zones
            .iter()
            .find(|z| z.zid == input.zid)
            .cloned()
            .map(|z| ZoneInfo { zid: None, ..z })
            .unwrap_or_default())
    }

    async fn list_records(
        &self,
        input: ListRecordsInput,
    ) -> Result<ListRecordsOutput, ProviderError> {
        self.record("ListRecords", &input)?;
        Ok(ListRecordsOutput {
            total_count: i32::try_from(self.records.len()).ok(),
            records: Some(self.records.clone()),
        })
    }

    async fn create_record(
        &self,
        input: CreateRecordInput,
    ) -> Result<CreateRecordOutput, ProviderError> {
        self.record("CreateRecord", &input)?;
        Ok(RecordOutput {
            record_id: Some("rec-1".to_string()),
            host: input.host,
            record_type: input.record_type,
            value: input.value,
            ttl: input.ttl,
            line: input.line,
            enable: Some(true),
            remark: input.remark,
            ..Default::default()
        })
    }

    async fn update_record(
        &self,
        input: UpdateRecordInput,
    ) -> Result<UpdateRecordOutput, ProviderError> {
        self.record("UpdateRecord", &input)?;
        Ok(RecordOutput {
            record_id: input.record_id,
            host: input.host,
            record_type: input.record_type,
            value: input.value,
            ttl: input.ttl,
            line: input.line,
            enable: Some(true),
            remark: input.remark,
            ..Default::default()
        })
    }

    async fn delete_record(
        &self,
        input: DeleteRecordInput,
    ) -> Result<DeleteRecordOutput, ProviderError> {
        self.record("DeleteRecord", &input)?;
        Ok(DeleteRecordOutput {})
    }

    async fn update_record_status(
        &self,
        input: UpdateRecordStatusInput,
    ) -> Result<UpdateRecordStatusOutput, ProviderError> {
        self.record("UpdateRecordStatus", &input)?;
        Ok(UpdateRecordStatusOutput {
            record_id: input.record_id,
            enable: input.enable,
        })
    }
}

// ============ 真实 Provider（需要环境变量） ============

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
    pub domain_id: Option<String>,
}

impl TestContext {
    fn from_credentials(kind: ProviderKind, credentials: &ProviderCredentials) -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = create_provider(kind, credentials).ok()?;
        Some(Self {
            provider,
            domain,
            domain_id: None,
        })
    }

    /// 创建 `DNSPod` 测试上下文
    pub fn dnspod() -> Option<Self> {
        let login_token = env::var("DNSPOD_LOGIN_TOKEN").ok()?;
        let credentials = ProviderCredentials {
            dnspod: Some(DnspodCredentials::new(login_token)),
            ..Default::default()
        };
        Self::from_credentials(ProviderKind::Dnspod, &credentials)
    }

    /// 创建 Aliyun 测试上下文
    pub fn aliyun() -> Option<Self> {
        let access_key_id = env::var("ALIYUN_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIYUN_ACCESS_KEY_SECRET").ok()?;
        let credentials = ProviderCredentials {
            aliyun: Some(AliyunCredentials::new(access_key_id, access_key_secret)),
            ..Default::default()
        };
        Self::from_credentials(ProviderKind::Aliyun, &credentials)
    }

    /// 创建 Volcengine 测试上下文
    pub fn volcengine() -> Option<Self> {
        let access_key_id = env::var("VOLCENGINE_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("VOLCENGINE_SECRET_ACCESS_KEY").ok()?;
        let credentials = ProviderCredentials {
            volcengine: Some(VolcengineCredentials::new(access_key_id, secret_access_key)),
            ..Default::default()
        };
        Self::from_credentials(ProviderKind::Volcengine, &credentials)
    }

    /// 查找测试域名的 `domain_id`
    pub async fn find_domain_id(&mut self) -> Option<String> {
        if self.domain_id.is_some() {
            return self.domain_id.clone();
        }

        let domains = self.provider.list_domains(Some(&self.domain)).await.ok()?;
        let id = domains.into_iter().find(|d| d.name == self.domain)?.id;
        self.domain_id = Some(id.clone());
        Some(id)
    }

    /// 创建 TXT 测试记录
    pub async fn create_test_record(&self, domain_id: &str) -> Option<DnsRecord> {
        let request = CreateRecordRequest::new(
            domain_id,
            generate_test_record_name(),
            "TXT",
            "integration-test",
        );
        self.provider.create_record(&request).await.ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record_id: &str, domain_id: &str) {
        let _ = self.provider.delete_record(record_id, domain_id).await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self, domain_id: &str) {
        if let Ok(records) = self.provider.list_records(domain_id, Some("_test-")).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.provider.delete_record(&record.id, domain_id).await;
                }
            }
        }
    }
}
