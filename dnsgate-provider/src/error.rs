use serde::{Deserialize, Serialize};

/// Classification of a provider-reported failure.
///
/// Derived from the provider's native error code by each adapter. The classification
/// never alters the provider's message, which is always carried verbatim in
/// [`ProviderError::ProviderApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Authentication failed (bad token, unknown key, signature mismatch).
    InvalidCredentials,
    /// The referenced record does not exist.
    RecordNotFound,
    /// The referenced domain/zone does not exist.
    DomainNotFound,
    /// A record with the same name/type/value already exists.
    RecordExists,
    /// The account is not allowed to perform this operation.
    PermissionDenied,
    /// The provider throttled the request.
    RateLimited,
    /// The provider rejected one of the request parameters.
    InvalidParameter,
    /// Any code not mapped to a more specific kind.
    Other,
}

/// Error returned by every adapter and by the manager.
///
/// Every variant names the provider it came from and serializes with a `code` tag, so it
/// can be handed to callers as-is.
///
/// Adapters surface the first variant that applies and never fall back to another provider.
/// No variant is retried internally: every adapter call performs exactly one external call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The targeted (or default) provider has no complete credentials.
    ///
    /// Raised before any I/O is attempted.
    ProviderNotConfigured {
        /// Provider identifier that was resolved.
        provider: String,
    },

    /// The request never got a response: connect failure, reset, TLS error.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// No response within the configured request timeout.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The transport succeeded but the response is not the expected envelope
    /// (HTML error page, malformed JSON, missing payload).
    ProtocolError {
        /// Provider that produced the error.
        provider: String,
        /// What was wrong with the response.
        detail: String,
        /// Truncated excerpt of the response body for diagnosis.
        excerpt: String,
    },

    /// The envelope parsed successfully but carries a non-success status.
    ProviderApiError {
        /// Provider that produced the error.
        provider: String,
        /// Classification of the provider's error code.
        kind: ApiErrorKind,
        /// Native code as the provider returned it.
        raw_code: Option<String>,
        /// The provider's own error text, verbatim.
        message: String,
    },

    /// A request parameter was rejected before any I/O.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Offending field.
        param: String,
        /// Why it was rejected.
        detail: String,
    },

    /// A request could not be encoded or signed.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Encoder message.
        detail: String,
    },
}

impl ProviderError {
    /// 调用方输入或远端状态导致的错误记 `warn`，其余记 `error`。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ProviderNotConfigured { .. } | Self::InvalidParameter { .. } => true,
            Self::ProviderApiError { kind, .. } => *kind != ApiErrorKind::Other,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ProtocolError { .. }
            | Self::SerializationError { .. } => false,
        }
    }

    /// Provider identifier carried by every variant.
    pub fn provider(&self) -> &str {
        match self {
            Self::ProviderNotConfigured { provider }
            | Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ProtocolError { provider, .. }
            | Self::ProviderApiError { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::SerializationError { provider, .. } => provider,
        }
    }

    /// Classification of a provider API error, `None` for every other variant.
    pub fn api_error_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::ProviderApiError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProviderNotConfigured { provider } => {
                write!(f, "[{provider}] Provider not configured")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ProtocolError {
                provider,
                detail,
                excerpt,
            } => {
                if excerpt.is_empty() {
                    write!(f, "[{provider}] Protocol error: {detail}")
                } else {
                    write!(f, "[{provider}] Protocol error: {detail} (response: {excerpt})")
                }
            }
            Self::ProviderApiError {
                provider, message, ..
            } => {
                write!(f, "[{provider}] {message}")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProviderError>;
