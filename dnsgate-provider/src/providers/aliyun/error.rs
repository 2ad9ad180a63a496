//! 阿里云错误码归类

use crate::error::ApiErrorKind;
use crate::traits::ProviderErrorMapper;

use super::AliyunProvider;

/// 阿里云错误码映射
/// 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>
impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        "aliyun"
    }

    fn classify(&self, code: &str) -> ApiErrorKind {
        match code {
            // ============ 认证错误 ============
            "InvalidAccessKeyId.NotFound"
            | "InvalidAccessKeyId"
            | "InvalidAccessKeyId.Inactive"
            | "SignatureDoesNotMatch"
            | "IncompleteSignature" => ApiErrorKind::InvalidCredentials,

            // ============ 记录已存在 ============
            "DomainRecordDuplicate" | "DomainRecordConflict" => ApiErrorKind::RecordExists,

            // ============ 记录不存在 ============
            "DomainRecordNotBelongToUser" | "InvalidRecordId.NotFound" | "InvalidRR.NoExist" => {
                ApiErrorKind::RecordNotFound
            }

            // ============ 域名不存在 ============
            "InvalidDomainName.NoExist" | "DomainNotFound" => ApiErrorKind::DomainNotFound,

            // ============ 频率限流 ============
            "Throttling" | "Throttling.User" | "Throttling.Api" => ApiErrorKind::RateLimited,

            // ============ 权限/操作被拒绝 ============
            "Forbidden"
            | "Forbidden.RiskControl"
            | "OperationDomain.NoPermission"
            | "IllegalUser"
            | "IncorrectDomainUser"
            | "DomainRecordLocked"
            | "Forbidden.DomainExpired" => ApiErrorKind::PermissionDenied,

            // ============ 参数无效 ============
            "InvalidRR.TypeEmpty"
            | "SubDomainInvalid.Type"
            | "InvalidRR.AValue"
            | "InvalidRR.AAAAValue"
            | "InvalidRR.MXValue"
            | "InvalidRR.NSValue"
            | "InvalidRR.RrEmpty"
            | "InvalidRR.Format"
            | "InvalidRR.Length"
            | "SubDomainInvalid.TTL"
            | "SubDomainInvalid.Line"
            | "UnsupportedLine"
            | "SubDomainInvalid.Priority"
            | "InvalidDomainName.Format"
            | "InvalidDomainName.Suffix"
            | "DomainEmpty"
            | "SignatureNonceUsed"
            | "InvalidTimeStamp.Format"
            | "InvalidTimeStamp.Expired"
            | "MissingParameter"
            | "InvalidParameter" => ApiErrorKind::InvalidParameter,

            code if code.starts_with("QuotaExceeded") => ApiErrorKind::PermissionDenied,

            _ => ApiErrorKind::Other,
        }
    }
}
