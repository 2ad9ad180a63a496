//! `DNSPod` 错误码归类

use crate::error::ApiErrorKind;
use crate::traits::ProviderErrorMapper;

use super::DnspodProvider;

/// `DNSPod` 旧版 API 状态码映射
/// 参考: <https://docs.dnspod.cn/api/5f561f9ee75cf42d25bf6720/>
impl ProviderErrorMapper for DnspodProvider {
    fn provider_name(&self) -> &'static str {
        "dnspod"
    }

    fn classify(&self, code: &str) -> ApiErrorKind {
        match code {
            // 登录失败
            "-1" => ApiErrorKind::InvalidCredentials,
            // API 使用超出限制 / 登录失败次数过多
            "-2" | "-8" => ApiErrorKind::RateLimited,
            // 不是代理、不能使用此接口、企业账号需要升级、帐号被封禁、域名被锁定
            "-3" | "-4" | "-7" | "-15" | "7" | "21" => ApiErrorKind::PermissionDenied,
            // 域名 ID 错误 / 域名不存在
            "6" | "9" => ApiErrorKind::DomainNotFound,
            // 记录 ID 错误
            "8" => ApiErrorKind::RecordNotFound,
            // 记录已存在
            "104" => ApiErrorKind::RecordExists,
            // 子域名 / 记录类型 / 记录值 / 线路 / MX / TTL 不合法
            "17" | "22" | "23" | "24" | "25" | "26" | "27" | "28" | "29" | "30" | "31" | "32"
            | "33" | "34" | "35" => ApiErrorKind::InvalidParameter,
            _ => ApiErrorKind::Other,
        }
    }
}
