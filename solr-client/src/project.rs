//! Project resource client.
//!
//! Maps the domain operations for project records onto REST transport
//! calls under the `/project` path prefix.

use crate::client::SolrRestClient;
use crate::model::SolrProject;
use pride_common::ApiResult;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

const PROJECT_PATH: &str = "/project";

/// Returns true when a response body is the "resource absent" sentinel.
///
/// The service answers read requests that match nothing with an empty,
/// blank or literal "null" body rather than an error status.
fn is_absent_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}

/// Client for the `/project` resource of the Solr API.
///
/// All operations suspend during the underlying network call and may
/// surface the transport's failure conditions; read operations map the
/// absent-body sentinel to `None` instead.
pub struct SolrProjectClient {
    rest: Arc<SolrRestClient>,
}

impl SolrProjectClient {
    /// Create a project client over the given transport.
    #[must_use]
    pub fn new(rest: Arc<SolrRestClient>) -> Self {
        Self { rest }
    }

    /// Find a project by its accession.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a malformed response body.
    #[instrument(skip(self))]
    pub async fn find_by_accession(&self, accession: &str) -> ApiResult<Option<SolrProject>> {
        let query = [("accession", accession)];
        let body = self
            .rest
            .get(&format!("{PROJECT_PATH}/findByAccession"), None, Some(&query))
            .await?;

        if is_absent_body(&body) {
            debug!(accession, "No project found");
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Save all given projects in one request.
    ///
    /// # Errors
    ///
    /// Fails on transport or serialization errors.
    #[instrument(skip(self, projects), fields(count = projects.len()))]
    pub async fn save_all(&self, projects: &[SolrProject]) -> ApiResult<()> {
        let payload = serde_json::to_string(projects)?;
        self.rest
            .post(&format!("{PROJECT_PATH}/saveAll"), &payload)
            .await?;
        Ok(())
    }

    /// Save a new project and return it as persisted by the service.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a missing/malformed response body.
    #[instrument(skip(self, project), fields(accession = %project.accession))]
    pub async fn save(&self, project: &SolrProject) -> ApiResult<SolrProject> {
        self.post_project(&format!("{PROJECT_PATH}/save"), project).await
    }

    /// Update an existing project and return it as persisted by the service.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a missing/malformed response body.
    #[instrument(skip(self, project), fields(accession = %project.accession))]
    pub async fn update(&self, project: &SolrProject) -> ApiResult<SolrProject> {
        self.post_project(&format!("{PROJECT_PATH}/update"), project).await
    }

    /// Save or update a project and return it as persisted by the service.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a missing/malformed response body.
    #[instrument(skip(self, project), fields(accession = %project.accession))]
    pub async fn upsert(&self, project: &SolrProject) -> ApiResult<SolrProject> {
        self.post_project(&format!("{PROJECT_PATH}/upsert"), project).await
    }

    async fn post_project(&self, path: &str, project: &SolrProject) -> ApiResult<SolrProject> {
        let payload = serde_json::to_string(project)?;
        let body = self.rest.post(path, &payload).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Delete the project with the given internal identifier.
    ///
    /// # Errors
    ///
    /// Fails unless the service answers with status 204.
    #[instrument(skip(self))]
    pub async fn delete_project_by_id(&self, id: &str) -> ApiResult<()> {
        let query = [("id", id)];
        self.rest
            .delete(&format!("{PROJECT_PATH}/deleteProjectById"), Some(&query))
            .await?;
        Ok(())
    }

    /// Delete every project.
    ///
    /// # Errors
    ///
    /// Fails unless the service answers with status 204.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> ApiResult<()> {
        self.rest
            .delete(&format!("{PROJECT_PATH}/deleteAll"), None)
            .await?;
        Ok(())
    }

    /// Fetch the accessions of all indexed projects.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a malformed response body.
    #[instrument(skip(self))]
    pub async fn find_all_accessions(&self) -> ApiResult<Option<HashSet<String>>> {
        self.get_string_set(&format!("{PROJECT_PATH}/findAllAccessions")).await
    }

    /// Fetch the internal identifiers of all indexed projects.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a malformed response body.
    #[instrument(skip(self))]
    pub async fn find_all_ids(&self) -> ApiResult<Option<HashSet<String>>> {
        self.get_string_set(&format!("{PROJECT_PATH}/findAllIds")).await
    }

    /// Fetch accessions of projects indexed without any file names.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a malformed response body.
    #[instrument(skip(self))]
    pub async fn find_project_accessions_with_empty_file_names(
        &self,
    ) -> ApiResult<Option<HashSet<String>>> {
        self.get_string_set(&format!(
            "{PROJECT_PATH}/findProjectAccessionsWithEmptyFileNames"
        ))
        .await
    }

    /// Fetch accessions of projects indexed without peptide sequences or
    /// protein identifications.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a malformed response body.
    #[instrument(skip(self))]
    pub async fn find_project_accessions_with_empty_peptide_sequences_or_protein_identifications(
        &self,
    ) -> ApiResult<Option<HashSet<String>>> {
        self.get_string_set(&format!(
            "{PROJECT_PATH}/findProjectAccessionsWithEmptyPeptideSequencesOrProteinIdentifications"
        ))
        .await
    }

    async fn get_string_set(&self, path: &str) -> ApiResult<Option<HashSet<String>>> {
        let body = self.rest.get(path, None, None).await?;
        if is_absent_body(&body) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_body_sentinels() {
        for body in ["", "   ", "\n\t", "null", "NULL", "Null", "nUlL", " null "] {
            assert!(is_absent_body(body), "{body:?} must read as absent");
        }
    }

    #[test]
    fn test_present_bodies() {
        for body in ["{}", "[]", "0", "\"null\"", "nullx", "[\"PXD006197\"]"] {
            assert!(!is_absent_body(body), "{body:?} must not read as absent");
        }
    }
}
