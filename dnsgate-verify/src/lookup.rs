//! DNS lookup seam used by the TXT / CNAME checks.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::rr::RecordType,
};

use crate::error::{VerifyError, VerifyResult};

/// Resolves the two record types the engine needs.
///
/// Errors are [`VerifyError::Dns`]; the engine reports them as failed checks.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// TXT records at `name`, each record's character-strings joined with a single space.
    async fn txt(&self, name: &str) -> VerifyResult<Vec<String>>;

    /// First CNAME target at `name`, as returned (a trailing root dot may be present).
    async fn cname(&self, name: &str) -> VerifyResult<Option<String>>;
}

/// [`DnsLookup`] backed by hickory, querying a fixed list of upstream resolvers.
///
/// A resolver is built per query, so no answer cache is shared between checks.
#[derive(Debug, Clone)]
pub struct HickoryLookup {
    resolvers: Vec<SocketAddr>,
    timeout: Duration,
}

impl HickoryLookup {
    pub fn new(resolvers: Vec<SocketAddr>, timeout: Duration) -> VerifyResult<Self> {
        if resolvers.is_empty() {
            return Err(VerifyError::Transport(
                "at least one DNS resolver is required".to_string(),
            ));
        }
        Ok(Self { resolvers, timeout })
    }

    pub fn resolvers(&self) -> &[SocketAddr] {
        &self.resolvers
    }

    fn build_resolver(&self) -> TokioResolver {
        let mut group = NameServerConfigGroup::new();
        for addr in &self.resolvers {
            group.merge(NameServerConfigGroup::from_ips_clear(
                &[addr.ip()],
                addr.port(),
                true,
            ));
        }
        let config = ResolverConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.timeout = self.timeout;
        opts.attempts = 1;
        opts.cache_size = 0;

        TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn txt(&self, name: &str) -> VerifyResult<Vec<String>> {
        log::debug!("[verify] TXT {name} via {:?}", self.resolvers);
        let response = self
            .build_resolver()
            .txt_lookup(name)
            .await
            .map_err(|e| VerifyError::Dns(e.to_string()))?;

        Ok(response
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data).into_owned())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect())
    }

    async fn cname(&self, name: &str) -> VerifyResult<Option<String>> {
        log::debug!("[verify] CNAME {name} via {:?}", self.resolvers);
        let response = self
            .build_resolver()
            .lookup(name, RecordType::CNAME)
            .await
            .map_err(|e| VerifyError::Dns(e.to_string()))?;

        Ok(response
            .record_iter()
            .find_map(|record| record.data().as_cname().map(|cname| cname.0.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_resolver() {
        assert!(matches!(
            HickoryLookup::new(Vec::new(), Duration::from_secs(1)),
            Err(VerifyError::Transport(_))
        ));
    }

    #[test]
    fn test_build_resolver_with_custom_ports() {
        let resolvers = vec![
            SocketAddr::from(([8, 8, 8, 8], 53)),
            SocketAddr::from(([127, 0, 0, 1], 5353)),
        ];
        let lookup = HickoryLookup::new(resolvers, Duration::from_secs(2));
        assert!(lookup.is_ok());
        if let Ok(lookup) = lookup {
            assert_eq!(lookup.resolvers().len(), 2);
            let _resolver = lookup.build_resolver();
        }
    }
}
