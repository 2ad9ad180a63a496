//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the verification engine.
///
/// A check that ran and did not find the expected value is not an error; it is a
/// [`VerificationResult`](crate::VerificationResult) with `success == false`. Only malformed
/// input and transport setup failures surface here. [`Dns`](Self::Dns) and
/// [`Http`](Self::Http) come from the lookup/fetch seams and are folded into a failed
/// result by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum VerifyError {
    /// 不支持的验证类型
    #[error("Unsupported verification type: {0}")]
    UnsupportedType(String),

    /// 域名为空或格式不对
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// 挑战值不可用（为空，或文件验证时不足 16 个字符）
    #[error("Invalid challenge: {0}")]
    InvalidChallenge(String),

    /// DNS 查询失败（解析器不可达、非 NOERROR 应答等）
    #[error("DNS query failed: {0}")]
    Dns(String),

    /// 文件拉取失败（连接失败、超时、非 200 状态码）
    #[error("HTTP fetch failed: {0}")]
    Http(String),

    /// 无法构建 HTTP 客户端 / 解析器
    #[error("Transport setup failed: {0}")]
    Transport(String),
}

/// 验证 Result 类型别名
pub type VerifyResult<T> = std::result::Result<T, VerifyError>;
