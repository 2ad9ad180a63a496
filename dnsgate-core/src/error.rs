//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use dnsgate_provider::ProviderError;
pub use dnsgate_verify::VerifyError;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// 配置文件读取失败
    #[error("Cannot read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    /// TOML 解析 / 序列化失败
    #[error("Invalid configuration: {0}")]
    ConfigParse(String),

    /// 配置值不合法
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Verification error (converting from library)
    #[error("{0}")]
    Verify(#[from] VerifyError),
}

impl CoreError {
    /// Whether the error is caused by caller input (log at `warn`) rather than by the
    /// environment or a provider malfunction (log at `error`).
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_expected(),
            Self::Verify(e) => matches!(
                e,
                VerifyError::UnsupportedType(_)
                    | VerifyError::InvalidDomain(_)
                    | VerifyError::InvalidChallenge(_)
            ),
            Self::InvalidConfig { .. } => true,
            Self::ConfigRead { .. } | Self::ConfigParse(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
