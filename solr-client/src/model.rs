//! Project record types exchanged with the Solr API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A project record as indexed by the Solr web service.
///
/// The client only interprets the accession and the internal identifier;
/// every other field is carried in [`SolrProject::extra`] untouched, so
/// records round-trip through the client without loss and fields added
/// by newer service versions are never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrProject {
    /// Human-readable unique identifier assigned by the archive
    pub accession: String,

    /// Internal Solr document identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// All remaining document fields, passed through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SolrProject {
    /// Create a record with the given accession and no other fields.
    #[must_use]
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            id: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the internal identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an arbitrary document field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let project = SolrProject::new("PXD006197")
            .with_id("123")
            .with_field("projectTitle", json!("Proteome of something"))
            .with_field("projectFileNames", json!(["a.raw", "b.raw"]));

        let encoded = serde_json::to_string(&project).expect("encode");
        let decoded: SolrProject = serde_json::from_str(&encoded).expect("decode");

        assert_eq!(decoded, project);
        assert_eq!(decoded.accession, "PXD006197");
        assert_eq!(decoded.id.as_deref(), Some("123"));
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let body = r#"{"accession":"PXD006197","id":"123","newField":{"nested":1}}"#;
        let decoded: SolrProject = serde_json::from_str(body).expect("decode");

        assert_eq!(decoded.extra.get("newField"), Some(&json!({"nested": 1})));

        let encoded = serde_json::to_value(&decoded).expect("encode");
        assert_eq!(encoded["newField"], json!({"nested": 1}));
    }

    #[test]
    fn test_missing_id_tolerated() {
        let decoded: SolrProject =
            serde_json::from_str(r#"{"accession":"PXD006197"}"#).expect("decode");
        assert_eq!(decoded.id, None);

        let encoded = serde_json::to_string(&decoded).expect("encode");
        assert!(!encoded.contains("\"id\""));
    }

    #[test]
    fn test_missing_accession_is_an_error() {
        let result = serde_json::from_str::<SolrProject>(r#"{"id":"123"}"#);
        assert!(result.is_err());
    }
}
