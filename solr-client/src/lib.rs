//! Solr API client for PRIDE Archive project records.
//!
//! Provides typed CRUD operations for the `/project` resource of the
//! Solr-backed PRIDE web service: request construction and header
//! injection, JSON mapping of project records, and retry of transient
//! transport failures.
//!
//! Construction goes through [`SolrApiClientFactory`], which binds one
//! configured transport to a memoized [`SolrProjectClient`]:
//!
//! ```no_run
//! use pride_solr_client::{SolrApiClientFactory, SolrApiConfig};
//!
//! # async fn run() -> pride_common::ApiResult<()> {
//! let config = SolrApiConfig::new(
//!     "https://www.ebi.ac.uk/pride/solr/api",
//!     "x-api-key",
//!     "secret",
//!     "pride-archive-pipeline",
//! );
//! let factory = SolrApiClientFactory::new(config)?;
//! let _project = factory.project_client().find_by_accession("PXD006197").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod factory;
pub mod model;
pub mod project;

pub use client::SolrRestClient;
pub use config::SolrApiConfig;
pub use factory::SolrApiClientFactory;
pub use model::SolrProject;
pub use project::SolrProjectClient;
