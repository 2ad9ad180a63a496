use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};

/// Prefix of the record name every DNS / CNAME challenge lives under.
pub const RECORD_PREFIX: &str = "_cdnauth";
/// Directory the file challenge is served from.
pub const WELL_KNOWN_DIR: &str = "/.well-known";
/// Hex characters of the token used in the challenge file name.
pub const FILE_TOKEN_PREFIX_LEN: usize = 16;
/// Hex characters of the token used in the CNAME target label.
pub const CNAME_TOKEN_PREFIX_LEN: usize = 8;

// ============ Verification Type ============

/// How ownership of a domain is proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationType {
    /// TXT record at `_cdnauth.<domain>` containing the token.
    Dns,
    /// CNAME at `_cdnauth.<domain>` pointing at `checkpoint-<token[..8]>.<verification domain>`.
    Cname,
    /// File at `/.well-known/cdn-auth-<token[..16]>.txt` whose body is the token.
    File,
}

impl VerificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dns => "dns",
            Self::Cname => "cname",
            Self::File => "file",
        }
    }

    /// Parses `dns` / `cname` / `file` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> VerifyResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dns" => Ok(Self::Dns),
            "cname" => Ok(Self::Cname),
            "file" => Ok(Self::File),
            _ => Err(VerifyError::UnsupportedType(value.to_string())),
        }
    }
}

impl FromStr for VerificationType {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Challenge ============

/// A freshly generated challenge.
///
/// Nothing is stored server-side: the caller keeps [`expected_value`](Self::expected_value)
/// and passes it back to
/// [`VerificationEngine::verify_domain`](crate::VerificationEngine::verify_domain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub domain: String,
    pub verification_type: VerificationType,
    /// 32 hex characters (16 random bytes).
    pub token: String,
    /// Instruction for the domain owner.
    pub message: String,
    /// `TXT` or `CNAME` for record challenges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// `_cdnauth.<domain>` for record challenges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_name: Option<String>,
    /// TXT value or CNAME target to publish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    /// URL path the file must be served at, e.g. `/.well-known/cdn-auth-0123456789abcdef.txt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl Challenge {
    /// The value to hand back at verification time: the token for `dns` / `file`,
    /// the CNAME target for `cname`.
    pub fn expected_value(&self) -> &str {
        self.record_value
            .as_deref()
            .or(self.file_content.as_deref())
            .unwrap_or(&self.token)
    }
}

/// Outcome of one live check. A failed check is a normal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    pub message: String,
}

impl VerificationResult {
    pub fn passed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ============ Config ============

/// Verification engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Upstream resolvers queried for TXT / CNAME checks, in order.
    pub resolvers: Vec<SocketAddr>,
    /// Zone that CNAME challenges point into.
    pub verification_domain: String,
    /// Per-check timeout for both DNS queries and file fetches.
    pub timeout_secs: u64,
}

/// 默认公共解析器
pub const DEFAULT_RESOLVERS: [&str; 5] = [
    "8.8.8.8:53",
    "8.8.4.4:53",
    "223.5.5.5:53",
    "1.1.1.1:53",
    "114.114.114.114:53",
];

pub const DEFAULT_VERIFICATION_DOMAIN: &str = "xldns.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            resolvers: DEFAULT_RESOLVERS
                .iter()
                .filter_map(|addr| addr.parse().ok())
                .collect(),
            verification_domain: DEFAULT_VERIFICATION_DOMAIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
