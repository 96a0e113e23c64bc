//! Rendering of retrieval results into a display string.
//!
//! Pure functions only: no I/O, no side effects, identical input always
//! yields an identical string.

use serde_json::Value;

use crate::models::OpeningsResponse;

/// Rendered when a query matches nothing. The exact wording is part of the
/// tool's contract with its callers.
pub const NO_RESULTS_MESSAGE: &str = "No job openings found matching your query.";

/// Render a response into a human-readable multi-line transcript.
///
/// One numbered block per result in upstream order; the relevance score is
/// shown as a percentage with one decimal place when present; metadata and
/// source lines appear only when their data exists. The object-storage
/// location takes precedence over a web location when both are present.
pub fn format_openings_response(response: &OpeningsResponse) -> String {
    if response.total_results() == 0 {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut lines = vec![format!("Found {} job opening(s):\n", response.total_results())];

    for (idx, result) in response.results().iter().enumerate() {
        lines.push(format!("\n--- Job Opening #{} ---", idx + 1));

        if let Some(score) = result.score {
            lines.push(format!("Relevance Score: {:.1}%", score * 100.0));
        }

        lines.push(format!("\n{}", result.content));

        if !result.metadata.is_empty() {
            lines.push("\nMetadata:".to_string());
            for (key, value) in &result.metadata {
                lines.push(format!("  - {}: {}", key, display_value(value)));
            }
        }

        if let Some(source) = &result.source {
            lines.push(format!("\nSource Type: {}", source.source_type));
            if let Some(s3_location) = &source.s3_location {
                lines.push(format!("Location: {}", location_field(s3_location, "uri")));
            } else if let Some(web_location) = &source.web_location {
                lines.push(format!("URL: {}", location_field(web_location, "url")));
            }
        }

        // blank line between result blocks
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Strings render bare; everything else keeps its JSON rendering.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn location_field(location: &serde_json::Map<String, Value>, key: &str) -> String {
    location
        .get(key)
        .map(display_value)
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OpeningResult, SourceMetadata};
    use serde_json::json;

    fn result(content: &str, score: Option<f64>) -> OpeningResult {
        OpeningResult {
            content: content.to_string(),
            score,
            metadata: serde_json::Map::new(),
            source: None,
        }
    }

    fn as_map(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_zero_results_exact_sentinel() {
        let output = format_openings_response(&OpeningsResponse::new(vec![]));
        assert_eq!(output, "No job openings found matching your query.");
    }

    #[test]
    fn test_score_renders_as_percentage() {
        let response = OpeningsResponse::new(vec![result("Backend Engineer", Some(0.95))]);
        let output = format_openings_response(&response);
        assert!(output.contains("Relevance Score: 95.0%"));
    }

    #[test]
    fn test_absent_score_renders_no_percentage_line() {
        let response = OpeningsResponse::new(vec![result("Backend Engineer", None)]);
        let output = format_openings_response(&response);
        assert!(!output.contains("Relevance Score"));
        assert!(!output.contains('%'));
    }

    #[test]
    fn test_zero_score_is_still_rendered() {
        // A zero score is a signal; only absence suppresses the line.
        let response = OpeningsResponse::new(vec![result("Backend Engineer", Some(0.0))]);
        let output = format_openings_response(&response);
        assert!(output.contains("Relevance Score: 0.0%"));
    }

    #[test]
    fn test_metadata_lines() {
        let mut opening = result("Backend Engineer", None);
        opening.metadata = as_map(json!({
            "department": "Engineering",
            "headcount": 3,
        }));
        let output = format_openings_response(&OpeningsResponse::new(vec![opening]));
        assert!(output.contains("Metadata:"));
        assert!(output.contains("  - department: Engineering"));
        assert!(output.contains("  - headcount: 3"));
    }

    #[test]
    fn test_s3_location_takes_precedence_over_web() {
        let mut opening = result("Backend Engineer", None);
        opening.source = Some(SourceMetadata {
            source_type: "S3".to_string(),
            s3_location: Some(as_map(json!({ "uri": "s3://jobs/openings.json" }))),
            web_location: Some(as_map(json!({ "url": "https://jobs.example.com" }))),
        });
        let output = format_openings_response(&OpeningsResponse::new(vec![opening]));
        assert!(output.contains("Source Type: S3"));
        assert!(output.contains("Location: s3://jobs/openings.json"));
        assert!(!output.contains("URL:"));
    }

    #[test]
    fn test_web_location_when_no_s3() {
        let mut opening = result("Backend Engineer", None);
        opening.source = Some(SourceMetadata {
            source_type: "WEB".to_string(),
            s3_location: None,
            web_location: Some(as_map(json!({ "url": "https://jobs.example.com" }))),
        });
        let output = format_openings_response(&OpeningsResponse::new(vec![opening]));
        assert!(output.contains("Source Type: WEB"));
        assert!(output.contains("URL: https://jobs.example.com"));
    }

    #[test]
    fn test_location_missing_uri_renders_na() {
        let mut opening = result("Backend Engineer", None);
        opening.source = Some(SourceMetadata {
            source_type: "S3".to_string(),
            s3_location: Some(as_map(json!({ "bucket": "jobs" }))),
            web_location: None,
        });
        let output = format_openings_response(&OpeningsResponse::new(vec![opening]));
        assert!(output.contains("Location: N/A"));
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let mut opening = result("Backend Engineer", Some(0.42));
        opening.metadata = as_map(json!({ "a": 1, "b": 2 }));
        let response = OpeningsResponse::new(vec![opening]);
        assert_eq!(
            format_openings_response(&response),
            format_openings_response(&response)
        );
    }

    #[test]
    fn test_two_result_transcript_order() {
        let response = OpeningsResponse::new(vec![
            result("Software Engineer - Remote position", Some(0.95)),
            result("Senior Data Scientist position", Some(0.87)),
        ]);
        let output = format_openings_response(&response);

        assert!(output.starts_with("Found 2 job opening(s):"));
        assert!(output.contains("--- Job Opening #1 ---"));
        assert!(output.contains("--- Job Opening #2 ---"));
        assert!(output.contains("95.0%"));
        assert!(output.contains("87.0%"));

        let first = output.find("Software Engineer - Remote position").unwrap();
        let second = output.find("Senior Data Scientist position").unwrap();
        assert!(first < second);
    }
}
