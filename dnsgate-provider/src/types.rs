use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag at construction time,
/// but the identifier itself always parses so callers get `ProviderNotConfigured`
/// rather than an unknown-provider fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// `DNSPod` legacy token API.
    #[serde(alias = "dns_pod")]
    Dnspod,
    /// Aliyun DNS (signed RPC query API).
    Aliyun,
    /// Volcengine DNS (SDK session).
    Volcengine,
}

impl ProviderKind {
    /// Fixed order used to pick the default provider: the first one with credentials wins.
    pub const PRIORITY: [Self; 3] = [Self::Dnspod, Self::Aliyun, Self::Volcengine];

    /// Canonical identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dnspod => "dnspod",
            Self::Aliyun => "aliyun",
            Self::Volcengine => "volcengine",
        }
    }

    /// Parses a caller-supplied identifier (case-insensitive, surrounding whitespace ignored).
    ///
    /// Returns `None` for empty or unknown identifiers, which the manager resolves to
    /// its default provider.
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "dnspod" | "dns_pod" => Some(Self::Dnspod),
            "aliyun" => Some(Self::Aliyun),
            "volcengine" => Some(Self::Volcengine),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Domain Types ============

/// A domain (zone) managed by a DNS provider.
///
/// Only the fields every provider shares are unified here. Grade, owner, punycode and
/// similar metadata stay provider-specific and are reachable through each provider's
/// own `domain_details` / `zone_details` accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDomain {
    /// Provider-assigned domain/zone identifier.
    pub id: String,
    /// Domain name, e.g. `example.com`.
    pub name: String,
    /// Provider that hosts this domain.
    pub provider: ProviderKind,
    /// Number of records, if the provider reports it.
    pub record_count: Option<u32>,
}

// ============ DNS Record Types ============

/// Normalized record status.
///
/// Every adapter owns a total, reversible mapping between this and its native vocabulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Record is active.
    Enable,
    /// Record is paused.
    Disable,
}

impl RecordStatus {
    /// `"enable"` / `"disable"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// Parses `enable` / `disable` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("enable") {
            Some(Self::Enable)
        } else if value.eq_ignore_ascii_case("disable") {
            Some(Self::Disable)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNS record type.
///
/// Serialized as the uppercase mnemonic (`"A"`, `"AAAA"`, `"CNAME"`, ...). Types without a
/// dedicated variant are carried through as [`DnsRecordType::Other`] so provider-specific
/// types (e.g. DNSPod's `显性URL`) survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
    /// Any other type, kept verbatim.
    Other(String),
}

impl DnsRecordType {
    /// Wire mnemonic.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for DnsRecordType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for DnsRecordType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DnsRecordType> for String {
    fn from(value: DnsRecordType) -> Self {
        match value {
            DnsRecordType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized line (routing policy) used when the caller does not pick one.
pub const DEFAULT_LINE: &str = "default";

/// A DNS record as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-assigned record identifier (the remote ID).
    pub id: String,
    /// Domain/zone the record belongs to, as addressed by the caller.
    pub domain_id: String,
    /// Host label relative to the zone (`www`, `@`).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record value.
    pub value: String,
    /// TTL in seconds.
    pub ttl: i64,
    /// Line / routing policy, `default` when not set.
    pub line: String,
    /// Enabled or disabled. `None` when the provider's reply does not say, as with
    /// Aliyun's `UpdateDomainRecord`, which answers with the record ID only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Free-text remark.
    pub remark: String,
    /// MX priority, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Domain name or provider domain/zone ID.
    pub domain_id: String,
    /// Host label (`www`, `@`).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record value.
    pub value: String,
    /// TTL in seconds; clamped by the manager before reaching an adapter.
    #[serde(default = "default_ttl")]
    pub ttl: i64,
    /// Line / routing policy.
    #[serde(default = "default_line")]
    pub line: String,
    /// MX priority.
    #[serde(default)]
    pub priority: Option<i64>,
    /// Free-text remark.
    #[serde(default)]
    pub remark: Option<String>,
}

impl CreateRecordRequest {
    /// Request with the default TTL (600) and the default line.
    pub fn new(
        domain_id: impl Into<String>,
        name: impl Into<String>,
        record_type: impl Into<DnsRecordType>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            domain_id: domain_id.into(),
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl: DEFAULT_TTL,
            line: DEFAULT_LINE.to_string(),
            priority: None,
            remark: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

/// Request to update an existing DNS record.
///
/// Same shape as [`CreateRecordRequest`]; the record itself is addressed by the
/// `record_id` passed alongside it.
pub type UpdateRecordRequest = CreateRecordRequest;

// ============ TTL ============

/// TTL used when the input is missing, unparsable or not positive.
pub const DEFAULT_TTL: i64 = 600;
/// Largest TTL any adapter accepts.
pub const MAX_TTL: i64 = 2_147_483_647;

/// Normalizes a caller-supplied TTL string into `[1, MAX_TTL]`.
///
/// Unparsable or non-positive input becomes [`DEFAULT_TTL`]; anything above the
/// maximum (including digit strings too long for `i64`) becomes [`MAX_TTL`].
pub fn normalize_ttl(input: &str) -> i64 {
    match input.trim().parse::<i64>() {
        Ok(ttl) => clamp_ttl(ttl),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_TTL,
        Err(_) => DEFAULT_TTL,
    }
}

/// Clamps an already-numeric TTL into `[1, MAX_TTL]` using the same rules as [`normalize_ttl`].
pub fn clamp_ttl(ttl: i64) -> i64 {
    if ttl <= 0 {
        DEFAULT_TTL
    } else {
        ttl.min(MAX_TTL)
    }
}

fn default_ttl() -> i64 {
    DEFAULT_TTL
}

fn default_line() -> String {
    DEFAULT_LINE.to_string()
}

// ============ Batch Operation Types ============

/// 批量创建结果，`failures` 按请求顺序排列
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub created_records: Vec<DnsRecord>,
    pub failures: Vec<BatchCreateFailure>,
}

/// One rejected item of a batch create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateFailure {
    /// Position in the submitted list, starting at 0.
    pub request_index: usize,
    pub record_name: String,
    /// Display text of the [`ProviderError`](crate::ProviderError).
    pub reason: String,
}

/// 批量更新结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub updated_records: Vec<DnsRecord>,
    pub failures: Vec<BatchRecordFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateItem {
    pub record_id: String,
    pub request: UpdateRecordRequest,
}

/// Result of a batch delete or batch status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecordResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<BatchRecordFailure>,
}

/// A per-record failure inside a batch addressed by record ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecordFailure {
    pub record_id: String,
    pub reason: String,
}

// ============ Credential Types ============

/// Default request timeout applied to every outbound provider call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// `DNSPod` login token (`"<id>,<token>"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnspodCredentials {
    /// Login token sent as the `login_token` form field.
    pub login_token: String,
    /// API base URL override, defaults to `https://dnsapi.cn`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl DnspodCredentials {
    pub fn new(login_token: impl Into<String>) -> Self {
        Self {
            login_token: login_token.into(),
            endpoint: None,
        }
    }

    /// Blank tokens count as absent.
    pub fn is_complete(&self) -> bool {
        !self.login_token.trim().is_empty()
    }
}

/// Aliyun access key pair plus region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliyunCredentials {
    pub access_key_id: String,
    pub access_key_secret: String,
    /// `RegionId` public parameter.
    #[serde(default = "default_aliyun_region")]
    pub region_id: String,
    /// Endpoint override, defaults to `https://alidns.aliyuncs.com/`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl AliyunCredentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            region_id: default_aliyun_region(),
            endpoint: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.access_key_id.trim().is_empty() && !self.access_key_secret.trim().is_empty()
    }
}

/// Volcengine access key pair plus region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolcengineCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default = "default_volcengine_region")]
    pub region: String,
    /// Endpoint override, defaults to `https://open.volcengineapi.com`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl VolcengineCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: default_volcengine_region(),
            endpoint: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.access_key_id.trim().is_empty() && !self.secret_access_key.trim().is_empty()
    }
}

/// Per-provider optional credential bundles.
///
/// A provider is "configured" only when its bundle is present and complete. Missing
/// bundles are never an error by themselves; they only surface as
/// [`ProviderNotConfigured`](crate::ProviderError::ProviderNotConfigured) when that
/// provider is targeted.
///
/// ```toml
/// request_timeout_secs = 10
///
/// [dnspod]
/// login_token = "12345,abcdef"
///
/// [aliyun]
/// access_key_id = "LTAI..."
/// access_key_secret = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCredentials {
    pub dnspod: Option<DnspodCredentials>,
    pub aliyun: Option<AliyunCredentials>,
    pub volcengine: Option<VolcengineCredentials>,
    /// Timeout for every outbound provider call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProviderCredentials {
    fn default() -> Self {
        Self {
            dnspod: None,
            aliyun: None,
            volcengine: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProviderCredentials {
    /// Whether `kind` has a complete credential bundle.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Dnspod => self.dnspod.as_ref().is_some_and(DnspodCredentials::is_complete),
            ProviderKind::Aliyun => self.aliyun.as_ref().is_some_and(AliyunCredentials::is_complete),
            ProviderKind::Volcengine => self
                .volcengine
                .as_ref()
                .is_some_and(VolcengineCredentials::is_complete),
        }
    }

    /// Configured providers in priority order.
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::PRIORITY
            .into_iter()
            .filter(|kind| self.is_configured(*kind))
            .collect()
    }
}

fn default_aliyun_region() -> String {
    "cn-hangzhou".to_string()
}

fn default_volcengine_region() -> String {
    "cn-north-1".to_string()
}
