//! Construction point for the Solr API clients.

use crate::client::SolrRestClient;
use crate::config::SolrApiConfig;
use crate::project::SolrProjectClient;
use pride_common::ApiResult;
use std::sync::{Arc, OnceLock};

/// Factory binding one configured transport to the resource clients.
///
/// The project client is created on first use and memoized, so repeated
/// requests reuse one instance and therefore one underlying connection
/// pool. Initialization is guarded by [`OnceLock`] and safe under
/// concurrent first use.
pub struct SolrApiClientFactory {
    rest: Arc<SolrRestClient>,
    project: OnceLock<SolrProjectClient>,
}

impl SolrApiClientFactory {
    /// Create a factory for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot be constructed from
    /// the configuration.
    pub fn new(config: SolrApiConfig) -> ApiResult<Self> {
        Ok(Self {
            rest: Arc::new(SolrRestClient::new(config)?),
            project: OnceLock::new(),
        })
    }

    /// Get the project client, creating it on first call.
    pub fn project_client(&self) -> &SolrProjectClient {
        self.project
            .get_or_init(|| SolrProjectClient::new(Arc::clone(&self.rest)))
    }
}
