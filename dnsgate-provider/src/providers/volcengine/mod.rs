//! 火山引擎 DNS Provider
//!
//! The adapter talks to a [`VolcengineSession`]; the session owns transport and signing,
//! the adapter owns translation between the SDK's nullable shapes and the normalized
//! record/domain types.

mod error;
mod http;
mod provider;
mod session;
mod sign;
mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::types::VolcengineCredentials;

pub use session::{HttpVolcengineSession, HttpVolcengineSessionBuilder, VolcengineSession};
pub use types::{
    CreateRecordInput, CreateRecordOutput, DeleteRecordInput, DeleteRecordOutput,
    ListRecordsInput, ListRecordsOutput, ListZonesInput, ListZonesOutput, QueryZoneInput,
    RecordOutput, UpdateRecordInput, UpdateRecordOutput, UpdateRecordStatusInput,
    UpdateRecordStatusOutput, ZoneInfo,
};

pub(crate) const VOLCENGINE_DNS_ENDPOINT: &str = "https://open.volcengineapi.com";
pub(crate) const VOLCENGINE_DNS_VERSION: &str = "2018-08-01";
pub(crate) const VOLCENGINE_SERVICE: &str = "DNS";
pub(crate) const VOLCENGINE_REQUEST_TYPE: &str = "request";
pub(crate) const DEFAULT_REGION: &str = "cn-north-1";
/// `ListZones` / `ListRecords` 单页条数
pub(crate) const PAGE_SIZE: i32 = 100;

/// Volcengine DNS provider implementation.
///
/// Zones are addressed by their numeric ZID; a non-numeric domain ID is rejected with
/// [`ProviderError::InvalidParameter`](crate::ProviderError::InvalidParameter) before
/// any request is sent.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use dnsgate_provider::VolcengineProvider;
/// use dnsgate_provider::volcengine::HttpVolcengineSession;
///
/// let session = HttpVolcengineSession::builder("your-ak", "your-sk")
///     .region("cn-beijing")
///     .build()?;
/// let provider = VolcengineProvider::new(Arc::new(session));
/// # Ok::<(), dnsgate_provider::ProviderError>(())
/// ```
pub struct VolcengineProvider {
    pub(crate) session: Arc<dyn VolcengineSession>,
}

impl VolcengineProvider {
    /// Wraps an existing session.
    pub fn new(session: Arc<dyn VolcengineSession>) -> Self {
        Self { session }
    }

    /// Creates a provider backed by [`HttpVolcengineSession`].
    pub fn from_credentials(creds: &VolcengineCredentials, timeout_secs: u64) -> Result<Self> {
        let session = HttpVolcengineSession::from_credentials(creds, timeout_secs)?;
        Ok(Self::new(Arc::new(session)))
    }
}
