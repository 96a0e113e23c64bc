//! Result model for job-opening retrieval.
//!
//! Value objects only: everything here is constructed fresh per invocation,
//! owned by the call stack, and dropped after the response is formatted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted `max_results`.
pub const MIN_MAX_RESULTS: u32 = 1;
/// Largest accepted `max_results`.
pub const MAX_MAX_RESULTS: u32 = 100;
/// `max_results` used when the caller does not provide one.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Query envelope violations, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("query_text must not be empty")]
    EmptyQuery,

    #[error("max_results must be between {MIN_MAX_RESULTS} and {MAX_MAX_RESULTS}, got {0}")]
    MaxResultsOutOfRange(u32),
}

/// Validated query envelope for a job-opening search.
///
/// Construction is the validation boundary: an `OpeningQuery` that exists
/// always satisfies its constraints, so downstream layers do not re-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningQuery {
    query_text: String,
    max_results: u32,
}

impl OpeningQuery {
    /// Validate and build a query envelope.
    ///
    /// `max_results` defaults to [`DEFAULT_MAX_RESULTS`] when `None`.
    pub fn new(
        query_text: impl Into<String>,
        max_results: Option<u32>,
    ) -> std::result::Result<Self, ValidationError> {
        let query_text = query_text.into();
        if query_text.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if !(MIN_MAX_RESULTS..=MAX_MAX_RESULTS).contains(&max_results) {
            return Err(ValidationError::MaxResultsOutOfRange(max_results));
        }

        Ok(Self {
            query_text,
            max_results,
        })
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }
}

/// Provenance of a retrieved result.
///
/// The location type is always present (`"UNKNOWN"` when the service omits
/// it); either location mapping may be absent independently of the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Location type reported by the service, e.g. `"S3"` or `"WEB"`.
    #[serde(rename = "type")]
    pub source_type: String,

    /// Object-storage location details, when the source is object storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_location: Option<serde_json::Map<String, Value>>,

    /// Web location details, when the source is a web resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_location: Option<serde_json::Map<String, Value>>,
}

/// A single job opening retrieved from the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningResult {
    /// Raw retrieved text. May be empty; emptiness is not an error.
    pub content: String,

    /// Relevance score in `0.0..=1.0`. `None` means the service provided
    /// no signal, which is distinct from a score of zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Additional metadata reported by the service.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,

    /// Source provenance, when the service reported a location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

/// Ordered collection of retrieval results.
///
/// `total_results` is derived from `results` and cannot be set
/// independently; deserialization recomputes it from the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningsResponse {
    results: Vec<OpeningResult>,
    total_results: usize,
}

impl OpeningsResponse {
    /// Build a response; the total is derived from the result count.
    pub fn new(results: Vec<OpeningResult>) -> Self {
        let total_results = results.len();
        Self {
            results,
            total_results,
        }
    }

    /// Results in the order the service ranked them.
    pub fn results(&self) -> &[OpeningResult] {
        &self.results
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'de> Deserialize<'de> for OpeningsResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Any supplied total_results is ignored and silently corrected to
        // the true count.
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            results: Vec<OpeningResult>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(OpeningsResponse::new(raw.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opening(content: &str) -> OpeningResult {
        OpeningResult {
            content: content.to_string(),
            score: None,
            metadata: serde_json::Map::new(),
            source: None,
        }
    }

    #[test]
    fn test_query_defaults_max_results() {
        let query = OpeningQuery::new("software engineer", None).unwrap();
        assert_eq!(query.query_text(), "software engineer");
        assert_eq!(query.max_results(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_query_rejects_empty_text() {
        assert_eq!(
            OpeningQuery::new("", Some(5)),
            Err(ValidationError::EmptyQuery)
        );
    }

    #[test]
    fn test_query_max_results_bounds() {
        assert!(OpeningQuery::new("q", Some(1)).is_ok());
        assert!(OpeningQuery::new("q", Some(100)).is_ok());
        assert_eq!(
            OpeningQuery::new("q", Some(0)),
            Err(ValidationError::MaxResultsOutOfRange(0))
        );
        assert_eq!(
            OpeningQuery::new("q", Some(101)),
            Err(ValidationError::MaxResultsOutOfRange(101))
        );
    }

    #[test]
    fn test_total_results_is_derived() {
        let response = OpeningsResponse::new(vec![opening("a"), opening("b")]);
        assert_eq!(response.total_results(), 2);
        assert_eq!(response.results().len(), response.total_results());

        let empty = OpeningsResponse::new(vec![]);
        assert_eq!(empty.total_results(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_deserialize_corrects_total_results() {
        // A lying count must be silently corrected, not rejected.
        let response: OpeningsResponse = serde_json::from_value(json!({
            "results": [{ "content": "Software Engineer" }],
            "total_results": 42,
        }))
        .unwrap();
        assert_eq!(response.total_results(), 1);
    }

    #[test]
    fn test_result_optional_fields_default() {
        let result: OpeningResult = serde_json::from_value(json!({
            "content": "",
        }))
        .unwrap();
        assert_eq!(result.content, "");
        assert_eq!(result.score, None);
        assert!(result.metadata.is_empty());
        assert!(result.source.is_none());
    }

    #[test]
    fn test_source_metadata_type_field_name() {
        let source: SourceMetadata = serde_json::from_value(json!({
            "type": "S3",
            "s3_location": { "uri": "s3://bucket/jobs.json" },
        }))
        .unwrap();
        assert_eq!(source.source_type, "S3");
        assert!(source.s3_location.is_some());
        assert!(source.web_location.is_none());
    }
}
