//! Normalization of raw retrieve responses.
//!
//! Operates on the loosely-typed JSON tree the service returns. Every field
//! access is default-producing: a structurally malformed entry still parses
//! to an [`OpeningResult`] with empty content rather than being dropped.

use serde_json::Value;

use crate::models::{OpeningResult, SourceMetadata};

/// Extract all result entries from a retrieve response document, in the
/// order the service ranked them.
pub(crate) fn parse_retrieval_results(document: &Value) -> Vec<OpeningResult> {
    document
        .get("retrievalResults")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(parse_result_entry).collect())
        .unwrap_or_default()
}

fn parse_result_entry(entry: &Value) -> OpeningResult {
    let content = entry
        .pointer("/content/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Absent and out-of-range scores both mean "no relevance signal",
    // which is distinct from a score of zero.
    let score = entry
        .get("score")
        .and_then(Value::as_f64)
        .filter(|s| (0.0..=1.0).contains(s));

    let metadata = entry
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    // An empty location mapping carries no provenance; only a non-empty
    // object yields a source.
    let source = entry
        .get("location")
        .filter(|location| location.as_object().is_some_and(|map| !map.is_empty()))
        .map(parse_source);

    OpeningResult {
        content,
        score,
        metadata,
        source,
    }
}

fn parse_source(location: &Value) -> SourceMetadata {
    SourceMetadata {
        source_type: location
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string(),
        s3_location: location
            .get("s3Location")
            .and_then(Value::as_object)
            .cloned(),
        web_location: location
            .get("webLocation")
            .and_then(Value::as_object)
            .cloned(),
    }
}
