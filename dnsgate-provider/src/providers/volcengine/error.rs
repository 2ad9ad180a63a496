//! 火山引擎错误码归类

use crate::error::ApiErrorKind;
use crate::traits::ProviderErrorMapper;

use super::session::HttpVolcengineSession;

/// 火山引擎错误码映射
/// 参考: <https://www.volcengine.com/docs/6369/68677>
impl ProviderErrorMapper for HttpVolcengineSession {
    fn provider_name(&self) -> &'static str {
        "volcengine"
    }

    fn classify(&self, code: &str) -> ApiErrorKind {
        match code {
            "InvalidAccessKey"
            | "InvalidCredential"
            | "MissingAuthenticationToken"
            | "SignatureDoesNotMatch"
            | "InvalidAuthorization"
            | "InvalidTimestamp" => ApiErrorKind::InvalidCredentials,

            "AccessDenied" | "Forbidden" | "InvalidActionOrVersion" => {
                ApiErrorKind::PermissionDenied
            }

            "FlowLimitExceeded" | "RequestLimitExceeded" | "Throttling" => {
                ApiErrorKind::RateLimited
            }

            "RecordNotFound" | "RecordNotExist" => ApiErrorKind::RecordNotFound,
            "ZoneNotFound" | "ZoneNotExist" => ApiErrorKind::DomainNotFound,
            "RecordDuplicated" | "RecordExists" | "RecordConflict" => ApiErrorKind::RecordExists,

            "MissingParameter" | "InvalidParameter" => ApiErrorKind::InvalidParameter,
            code if code.starts_with("InvalidParameter.") => ApiErrorKind::InvalidParameter,
            code if code.starts_with("NotFound.Record") => ApiErrorKind::RecordNotFound,
            code if code.starts_with("NotFound.Zone") => ApiErrorKind::DomainNotFound,

            _ => ApiErrorKind::Other,
        }
    }
}
