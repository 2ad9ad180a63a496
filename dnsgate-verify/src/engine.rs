use std::sync::Arc;
use std::time::Duration;

use crate::error::{VerifyError, VerifyResult};
use crate::fetch::{FileFetcher, HttpFileFetcher};
use crate::lookup::{DnsLookup, HickoryLookup};
use crate::types::{
    CNAME_TOKEN_PREFIX_LEN, Challenge, FILE_TOKEN_PREFIX_LEN, RECORD_PREFIX, VerificationResult,
    VerificationType, VerifierConfig, WELL_KNOWN_DIR,
};

/// Generates and checks domain-ownership challenges.
///
/// Stateless between the two calls: [`generate_challenge`](Self::generate_challenge) returns
/// everything the caller needs, and [`verify_domain`](Self::verify_domain) only looks at the
/// live DNS / HTTP state plus the value the caller hands back.
///
/// ```rust,no_run
/// use dnsgate_verify::{VerificationEngine, VerifierConfig};
///
/// # async fn run() -> dnsgate_verify::VerifyResult<()> {
/// let engine = VerificationEngine::new(VerifierConfig::default())?;
/// let challenge = engine.generate_challenge("example.com", "dns")?;
/// // ... the owner publishes the TXT record ...
/// let result = engine
///     .verify_domain("example.com", "dns", challenge.expected_value())
///     .await?;
/// println!("{}: {}", result.success, result.message);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VerificationEngine {
    config: VerifierConfig,
    lookup: Arc<dyn DnsLookup>,
    fetcher: Arc<dyn FileFetcher>,
}

impl VerificationEngine {
    /// Engine backed by hickory (configured resolvers) and reqwest.
    pub fn new(config: VerifierConfig) -> VerifyResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let lookup = HickoryLookup::new(config.resolvers.clone(), timeout)?;
        let fetcher = HttpFileFetcher::new(timeout)?;
        log::info!(
            "Verification engine ready: resolvers={:?}, verification_domain={}",
            config.resolvers,
            config.verification_domain
        );
        Ok(Self::with_backends(config, Arc::new(lookup), Arc::new(fetcher)))
    }

    /// Engine with caller-supplied lookup / fetch backends.
    pub fn with_backends(
        config: VerifierConfig,
        lookup: Arc<dyn DnsLookup>,
        fetcher: Arc<dyn FileFetcher>,
    ) -> Self {
        Self {
            config,
            lookup,
            fetcher,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    // ============ GenerateChallenge ============

    /// Creates a challenge for `domain`. An unsupported `verification_type` is an error.
    pub fn generate_challenge(&self, domain: &str, verification_type: &str) -> VerifyResult<Challenge> {
        let verification_type = VerificationType::parse(verification_type)?;
        self.challenge_for(domain, verification_type)
    }

    /// Typed variant of [`generate_challenge`](Self::generate_challenge).
    pub fn challenge_for(
        &self,
        domain: &str,
        verification_type: VerificationType,
    ) -> VerifyResult<Challenge> {
        let domain = normalize_domain(domain)?;
        let token = generate_token();
        log::debug!("[verify] new {verification_type} challenge for {domain}");

        let mut challenge = Challenge {
            domain: domain.clone(),
            verification_type,
            token: token.clone(),
            message: String::new(),
            record_type: None,
            record_name: None,
            record_value: None,
            file_name: None,
            file_content: None,
            file_path: None,
        };

        match verification_type {
            VerificationType::Dns => {
                challenge.message = "Add the following TXT record to your DNS settings".to_string();
                challenge.record_type = Some("TXT".to_string());
                challenge.record_name = Some(record_name(&domain));
                challenge.record_value = Some(token);
            }
            VerificationType::Cname => {
                challenge.message =
                    "Add the following CNAME record to your DNS settings".to_string();
                challenge.record_type = Some("CNAME".to_string());
                challenge.record_name = Some(record_name(&domain));
                challenge.record_value = Some(format!(
                    "checkpoint-{}.{}",
                    &token[..CNAME_TOKEN_PREFIX_LEN],
                    self.config.verification_domain
                ));
            }
            VerificationType::File => {
                let name = file_name(&token[..FILE_TOKEN_PREFIX_LEN]);
                challenge.message = format!(
                    "Serve a file containing the token at {WELL_KNOWN_DIR}/{name} on your website"
                );
                challenge.file_path = Some(format!("{WELL_KNOWN_DIR}/{name}"));
                challenge.file_name = Some(name);
                challenge.file_content = Some(token);
            }
        }

        Ok(challenge)
    }

    // ============ VerifyDomain ============

    /// Runs one live check of `challenge` against `domain`.
    ///
    /// A missing or mismatching record/file and any DNS or HTTP failure yield
    /// `Ok(VerificationResult { success: false, .. })`. Only an unsupported type, an empty
    /// domain or an unusable challenge value return `Err`.
    pub async fn verify_domain(
        &self,
        domain: &str,
        verification_type: &str,
        challenge: &str,
    ) -> VerifyResult<VerificationResult> {
        let verification_type = VerificationType::parse(verification_type)?;
        self.verify(domain, verification_type, challenge).await
    }

    /// Typed variant of [`verify_domain`](Self::verify_domain).
    pub async fn verify(
        &self,
        domain: &str,
        verification_type: VerificationType,
        challenge: &str,
    ) -> VerifyResult<VerificationResult> {
        let domain = normalize_domain(domain)?;
        if challenge.is_empty() {
            return Err(VerifyError::InvalidChallenge(
                "challenge value is empty".to_string(),
            ));
        }

        let result = match verification_type {
            VerificationType::Dns => self.verify_txt(&domain, challenge).await,
            VerificationType::Cname => self.verify_cname(&domain, challenge).await,
            VerificationType::File => self.verify_file(&domain, challenge).await?,
        };

        if result.success {
            log::info!("[verify] {verification_type} check passed for {domain}");
        } else {
            log::warn!(
                "[verify] {verification_type} check failed for {domain}: {}",
                result.message
            );
        }
        Ok(result)
    }

    async fn verify_txt(&self, domain: &str, expected: &str) -> VerificationResult {
        let name = record_name(domain);
        let records = match self.lookup.txt(&name).await {
            Ok(records) => records,
            Err(e) => return VerificationResult::failed(format!("TXT lookup for {name} failed: {e}")),
        };

        if records.iter().any(|txt| txt.contains(expected)) {
            VerificationResult::passed("DNS verification succeeded")
        } else {
            VerificationResult::failed(format!(
                "No matching TXT record at {name}; check the record and wait for it to propagate"
            ))
        }
    }

    async fn verify_cname(&self, domain: &str, expected: &str) -> VerificationResult {
        let name = record_name(domain);
        let target = match self.lookup.cname(&name).await {
            Ok(Some(target)) => target,
            Ok(None) => return VerificationResult::failed(format!("No CNAME record found at {name}")),
            Err(e) => {
                return VerificationResult::failed(format!("CNAME lookup for {name} failed: {e}"));
            }
        };

        if trim_root(&target) == trim_root(expected) {
            VerificationResult::passed("CNAME verification succeeded")
        } else {
            VerificationResult::failed(format!(
                "CNAME mismatch: expected {expected}, found {target}"
            ))
        }
    }

    async fn verify_file(&self, domain: &str, expected: &str) -> VerifyResult<VerificationResult> {
        let prefix = expected.get(..FILE_TOKEN_PREFIX_LEN).ok_or_else(|| {
            VerifyError::InvalidChallenge(format!(
                "file challenge must be at least {FILE_TOKEN_PREFIX_LEN} characters"
            ))
        })?;
        let path = format!("{WELL_KNOWN_DIR}/{}", file_name(prefix));

        let http_url = format!("http://{domain}{path}");
        let body = match self.fetcher.fetch(&http_url).await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("[verify] {http_url} failed ({e}), retrying over https");
                let https_url = format!("https://{domain}{path}");
                match self.fetcher.fetch(&https_url).await {
                    Ok(body) => body,
                    Err(e) => {
                        return Ok(VerificationResult::failed(format!(
                            "Cannot fetch verification file: {e}"
                        )));
                    }
                }
            }
        };

        if body.trim() == expected {
            Ok(VerificationResult::passed("File verification succeeded"))
        } else {
            Ok(VerificationResult::failed("Verification file content does not match"))
        }
    }
}

/// 16 random bytes, hex encoded.
fn generate_token() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

fn record_name(domain: &str) -> String {
    format!("{RECORD_PREFIX}.{domain}")
}

fn file_name(token_prefix: &str) -> String {
    format!("cdn-auth-{token_prefix}.txt")
}

/// 去掉一个末尾的根域名点
fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

fn normalize_domain(domain: &str) -> VerifyResult<String> {
    let domain = trim_root(domain.trim());
    if domain.is_empty() {
        return Err(VerifyError::InvalidDomain("domain is required".to_string()));
    }
    if domain.contains('/') || domain.chars().any(char::is_whitespace) {
        return Err(VerifyError::InvalidDomain(domain.to_string()));
    }
    Ok(domain.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// 预置应答的 lookup
    #[derive(Default)]
    struct StaticLookup {
        txt: Vec<String>,
        cname: Option<String>,
        error: Option<String>,
        queried: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DnsLookup for StaticLookup {
        async fn txt(&self, name: &str) -> VerifyResult<Vec<String>> {
            self.queried.lock().unwrap().push(name.to_string());
            match &self.error {
                Some(e) => Err(VerifyError::Dns(e.clone())),
                None => Ok(self.txt.clone()),
            }
        }

        async fn cname(&self, name: &str) -> VerifyResult<Option<String>> {
            self.queried.lock().unwrap().push(name.to_string());
            match &self.error {
                Some(e) => Err(VerifyError::Dns(e.clone())),
                None => Ok(self.cname.clone()),
            }
        }
    }

    /// http 失败、https 返回固定内容
    #[derive(Default)]
    struct HttpsOnlyFetcher {
        body: String,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileFetcher for HttpsOnlyFetcher {
        async fn fetch(&self, url: &str) -> VerifyResult<String> {
            self.urls.lock().unwrap().push(url.to_string());
            if url.starts_with("https://") {
                Ok(self.body.clone())
            } else {
                Err(VerifyError::Http("HTTP status 404".to_string()))
            }
        }
    }

    fn engine_with(lookup: StaticLookup) -> (VerificationEngine, Arc<StaticLookup>) {
        let lookup = Arc::new(lookup);
        let engine = VerificationEngine::with_backends(
            VerifierConfig::default(),
            lookup.clone(),
            Arc::new(HttpsOnlyFetcher::default()),
        );
        (engine, lookup)
    }

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }

    #[test]
    fn test_dns_challenge_shape() {
        let (engine, _) = engine_with(StaticLookup::default());
        let challenge = engine.generate_challenge("example.com", "dns").unwrap();
        assert_eq!(challenge.record_type.as_deref(), Some("TXT"));
        assert_eq!(challenge.record_name.as_deref(), Some("_cdnauth.example.com"));
        assert_eq!(challenge.expected_value(), challenge.token);
        assert!(challenge.file_name.is_none());
    }

    #[test]
    fn test_cname_challenge_shape() {
        let (engine, _) = engine_with(StaticLookup::default());
        let challenge = engine.generate_challenge("example.com.", "CNAME").unwrap();
        assert_eq!(challenge.domain, "example.com");
        assert_eq!(challenge.record_name.as_deref(), Some("_cdnauth.example.com"));
        assert_eq!(
            challenge.expected_value(),
            format!("checkpoint-{}.xldns.com", &challenge.token[..8])
        );
    }

    #[test]
    fn test_file_challenge_shape() {
        let (engine, _) = engine_with(StaticLookup::default());
        let challenge = engine.generate_challenge("example.com", "file").unwrap();
        let name = format!("cdn-auth-{}.txt", &challenge.token[..16]);
        assert_eq!(challenge.file_name.as_deref(), Some(name.as_str()));
        assert_eq!(
            challenge.file_path,
            Some(format!("/.well-known/{name}"))
        );
        assert_eq!(challenge.file_content.as_deref(), Some(challenge.token.as_str()));
        assert_eq!(challenge.expected_value(), challenge.token);
        assert!(challenge.record_name.is_none());
    }

    #[test]
    fn test_unsupported_type_and_bad_domain() {
        let (engine, _) = engine_with(StaticLookup::default());
        assert_eq!(
            engine.generate_challenge("example.com", "email"),
            Err(VerifyError::UnsupportedType("email".to_string()))
        );
        assert!(matches!(
            engine.generate_challenge("  ", "dns"),
            Err(VerifyError::InvalidDomain(_))
        ));
    }

    #[tokio::test]
    async fn test_txt_substring_match() {
        let (engine, lookup) = engine_with(StaticLookup {
            txt: vec![
                "v=spf1 -all".to_string(),
                "token=0123456789abcdef0123456789abcdef".to_string(),
            ],
            ..Default::default()
        });
        let result = engine
            .verify_domain("example.com", "dns", "0123456789abcdef0123456789abcdef")
            .await
            .unwrap();
        assert!(result.success, "{}", result.message);
        assert_eq!(lookup.queried.lock().unwrap()[0], "_cdnauth.example.com");
    }

    #[tokio::test]
    async fn test_dns_error_is_failed_result() {
        let (engine, _) = engine_with(StaticLookup {
            error: Some("SERVFAIL".to_string()),
            ..Default::default()
        });
        let result = engine
            .verify_domain("example.com", "dns", "abc")
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.message.contains("SERVFAIL"), "{}", result.message);

        let result = engine
            .verify_domain("example.com", "cname", "checkpoint-abc.xldns.com")
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.message.contains("SERVFAIL"));
    }

    #[tokio::test]
    async fn test_cname_trailing_dot_ignored() {
        for published in ["checkpoint-0123abcd.xldns.com.", "checkpoint-0123abcd.xldns.com"] {
            let (engine, _) = engine_with(StaticLookup {
                cname: Some(published.to_string()),
                ..Default::default()
            });
            let result = engine
                .verify_domain("example.com", "cname", "checkpoint-0123abcd.xldns.com")
                .await
                .unwrap();
            assert!(result.success, "{published}: {}", result.message);
        }
    }

    #[tokio::test]
    async fn test_cname_missing_and_mismatch() {
        let (unpublished, _) = engine_with(StaticLookup::default());
        let result = unpublished
            .verify_domain("example.com", "cname", "checkpoint-0123abcd.xldns.com")
            .await
            .unwrap();
        assert!(!result.success);

        let (mismatched, _) = engine_with(StaticLookup {
            cname: Some("checkpoint-0123abce.xldns.com.".to_string()),
            ..Default::default()
        });
        let result = mismatched
            .verify_domain("example.com", "cname", "checkpoint-0123abcd.xldns.com")
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.message.contains("checkpoint-0123abce.xldns.com."));
    }

    #[tokio::test]
    async fn test_file_falls_back_to_https() {
        let token = "0123456789abcdef0123456789abcdef";
        let fetcher = Arc::new(HttpsOnlyFetcher {
            body: format!("  {token}\n"),
            ..Default::default()
        });
        let engine = VerificationEngine::with_backends(
            VerifierConfig::default(),
            Arc::new(StaticLookup::default()),
            fetcher.clone(),
        );

        let result = engine.verify_domain("example.com", "file", token).await.unwrap();
        assert!(result.success, "{}", result.message);
        assert_eq!(
            *fetcher.urls.lock().unwrap(),
            vec![
                "http://example.com/.well-known/cdn-auth-0123456789abcdef.txt".to_string(),
                "https://example.com/.well-known/cdn-auth-0123456789abcdef.txt".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_file_challenge_too_short() {
        let (engine, _) = engine_with(StaticLookup::default());
        assert!(matches!(
            engine.verify_domain("example.com", "file", "short").await,
            Err(VerifyError::InvalidChallenge(_))
        ));
        assert!(matches!(
            engine.verify_domain("example.com", "dns", "").await,
            Err(VerifyError::InvalidChallenge(_))
        ));
    }
}
