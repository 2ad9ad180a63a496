//! 域名验证集成测试
//!
//! DNS 用预置的 lookup，文件验证用 wiremock 起的本地 HTTP 服务。

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{PublishedRecords, tamper};
use dnsgate_verify::{
    HttpFileFetcher, VerificationEngine, VerificationType, VerifierConfig, VerifyError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_with(records: PublishedRecords) -> VerificationEngine {
    let fetcher = HttpFileFetcher::new(Duration::from_secs(5)).expect("build fetcher");
    VerificationEngine::with_backends(VerifierConfig::default(), Arc::new(records), Arc::new(fetcher))
}

// ============ DNS (TXT) ============

#[tokio::test]
async fn test_dns_challenge_round_trip() {
    let generator = engine_with(PublishedRecords::default());
    let challenge = generator
        .generate_challenge("example.com", "dns")
        .expect("generate dns challenge");
    let name = challenge.record_name.clone().expect("record name");
    let value = challenge.record_value.clone().expect("record value");

    // 多段 TXT 已在 lookup 层用空格拼接
    let engine = engine_with(PublishedRecords::with_txt(
        &name,
        &["google-site-verification=abc", &format!("owner {value}")],
    ));
    let result = engine
        .verify_domain("example.com", "dns", challenge.expected_value())
        .await
        .expect("verify");
    assert!(result.success, "{}", result.message);

    let engine = engine_with(PublishedRecords::with_txt(&name, &[&tamper(&value)]));
    let result = engine
        .verify_domain("example.com", "dns", challenge.expected_value())
        .await
        .expect("verify");
    assert!(!result.success);
}

#[tokio::test]
async fn test_dns_resolver_failure_is_not_an_error() {
    let records = Arc::new(PublishedRecords::failing("connection refused"));
    let engine = VerificationEngine::with_backends(
        VerifierConfig::default(),
        records.clone(),
        Arc::new(HttpFileFetcher::new(Duration::from_secs(1)).expect("build fetcher")),
    );

    let result = engine
        .verify("example.com", VerificationType::Dns, "0123456789abcdef")
        .await
        .expect("failed lookup is still Ok");
    assert!(!result.success);
    assert!(result.message.contains("connection refused"), "{}", result.message);
    assert_eq!(records.queries(), vec!["_cdnauth.example.com".to_string()]);
}

// ============ CNAME ============

#[tokio::test]
async fn test_cname_challenge_round_trip() {
    let generator = engine_with(PublishedRecords::default());
    let challenge = generator
        .generate_challenge("example.com", "cname")
        .expect("generate cname challenge");
    let name = challenge.record_name.clone().expect("record name");
    let target = challenge.expected_value().to_string();
    assert!(target.starts_with("checkpoint-"));
    assert!(target.ends_with(".xldns.com"));

    for published in [target.clone(), format!("{target}.")] {
        let engine = engine_with(PublishedRecords::with_cname(&name, &published));
        let result = engine
            .verify_domain("example.com", "cname", &target)
            .await
            .expect("verify");
        assert!(result.success, "{published}: {}", result.message);
    }

    let engine = engine_with(PublishedRecords::with_cname(&name, &tamper(&target)));
    let result = engine
        .verify_domain("example.com", "cname", &target)
        .await
        .expect("verify");
    assert!(!result.success);
}

#[tokio::test]
async fn test_cname_uses_configured_verification_domain() {
    let config = VerifierConfig {
        verification_domain: "verify.example.net".to_string(),
        ..Default::default()
    };
    let engine = VerificationEngine::with_backends(
        config,
        Arc::new(PublishedRecords::default()),
        Arc::new(HttpFileFetcher::new(Duration::from_secs(1)).expect("build fetcher")),
    );
    let challenge = engine
        .challenge_for("example.com", VerificationType::Cname)
        .expect("generate");
    assert!(challenge.expected_value().ends_with(".verify.example.net"));
}

// ============ File ============

#[tokio::test]
async fn test_file_challenge_round_trip_over_http() {
    let server = MockServer::start().await;
    let domain = server.address().to_string();

    let generator = engine_with(PublishedRecords::default());
    let challenge = generator
        .generate_challenge(&domain, "file")
        .expect("generate file challenge");
    let file_path = challenge.file_path.clone().expect("file path");
    let content = challenge.file_content.clone().expect("file content");

    Mock::given(method("GET"))
        .and(path(file_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("{content}\n")))
        .expect(1)
        .mount(&server)
        .await;

    let result = generator
        .verify_domain(&domain, "file", challenge.expected_value())
        .await
        .expect("verify");
    assert!(result.success, "{}", result.message);
}

#[tokio::test]
async fn test_file_content_mismatch() {
    let server = MockServer::start().await;
    let domain = server.address().to_string();
    let token = "0123456789abcdef0123456789abcdef";

    Mock::given(method("GET"))
        .and(path("/.well-known/cdn-auth-0123456789abcdef.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(tamper(token)))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_with(PublishedRecords::default());
    let result = engine
        .verify_domain(&domain, "file", token)
        .await
        .expect("verify");
    assert!(!result.success);
}

#[tokio::test]
async fn test_file_missing_reports_failure() {
    let server = MockServer::start().await;
    let domain = server.address().to_string();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let engine = engine_with(PublishedRecords::default());
    let result = engine
        .verify_domain(&domain, "file", "0123456789abcdef0123456789abcdef")
        .await
        .expect("a missing file is a failed check, not an error");
    assert!(!result.success);
    assert!(
        result.message.starts_with("Cannot fetch verification file"),
        "{}",
        result.message
    );
}

// ============ 输入校验 ============

#[tokio::test]
async fn test_unsupported_type_is_error() {
    let engine = engine_with(PublishedRecords::default());
    assert!(matches!(
        engine.generate_challenge("example.com", "email"),
        Err(VerifyError::UnsupportedType(_))
    ));
    assert!(matches!(
        engine.verify_domain("example.com", "http", "abc").await,
        Err(VerifyError::UnsupportedType(_))
    ));
}

#[test]
fn test_challenge_serializes_camel_case() {
    let engine = engine_with(PublishedRecords::default());
    let challenge = engine
        .generate_challenge("example.com", "file")
        .expect("generate");
    let json = serde_json::to_value(&challenge).expect("serialize");
    assert_eq!(json["verificationType"], "file");
    assert!(json["fileName"].is_string());
    assert!(json.get("recordName").is_none());
}
