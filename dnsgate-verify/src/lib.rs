//! # dnsgate-verify
//!
//! Stateless domain-ownership verification.
//!
//! [`VerificationEngine::generate_challenge`] produces a random token and tells the owner
//! what to publish; [`VerificationEngine::verify_domain`] checks the live state:
//!
//! | Type | Published at | Passes when |
//! |------|--------------|-------------|
//! | `dns` | TXT `_cdnauth.<domain>` | any TXT value contains the token |
//! | `cname` | CNAME `_cdnauth.<domain>` | target equals `checkpoint-<token[..8]>.<verification domain>` (trailing dot ignored) |
//! | `file` | `http(s)://<domain>/.well-known/cdn-auth-<token[..16]>.txt` | trimmed body equals the token |
//!
//! No challenge is stored between the two calls. A failed check is an
//! `Ok(VerificationResult { success: false, .. })`, never an error.

mod engine;
mod error;
mod fetch;
mod lookup;
mod types;

pub use engine::VerificationEngine;
pub use error::{VerifyError, VerifyResult};
pub use fetch::{FileFetcher, HttpFileFetcher, MAX_FILE_BYTES};
pub use lookup::{DnsLookup, HickoryLookup};
pub use types::{
    CNAME_TOKEN_PREFIX_LEN, Challenge, DEFAULT_RESOLVERS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_VERIFICATION_DOMAIN, FILE_TOKEN_PREFIX_LEN, RECORD_PREFIX, VerificationResult,
    VerificationType, VerifierConfig, WELL_KNOWN_DIR,
};
