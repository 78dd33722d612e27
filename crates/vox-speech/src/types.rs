//! Wire types for the recognition endpoint.

use serde::Deserialize;

/// Result of one recognition call.
#[derive(Clone, Debug)]
pub struct RecognitionResult {
    /// The transcribed text. Empty means "no speech detected".
    pub text: String,
    /// Service-reported confidence, 0.0 when absent. Informational only.
    pub confidence: f64,
}

impl RecognitionResult {
    /// Whether the service heard nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Recognition endpoint response body.
///
/// `result` is either a single string or an array of segment strings,
/// depending on how the service chunked the audio.
#[derive(Debug, Deserialize)]
pub(crate) struct RecognitionResponse {
    #[serde(default)]
    result: Option<ResultField>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResultField {
    One(String),
    Many(Vec<String>),
}

impl RecognitionResponse {
    /// Collapse the wire shape into a [`RecognitionResult`].
    ///
    /// Segment arrays join with a single space. Whitespace-only text
    /// normalizes to the empty string, the valid no-speech outcome.
    pub(crate) fn into_result(self) -> RecognitionResult {
        let text = match self.result {
            Some(ResultField::One(s)) => s,
            Some(ResultField::Many(segments)) => segments.join(" "),
            None => String::new(),
        };
        let text = text.trim();
        RecognitionResult {
            text: if text.is_empty() {
                String::new()
            } else {
                text.to_string()
            },
            confidence: self.confidence.unwrap_or(0.0),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RecognitionResult {
        serde_json::from_str::<RecognitionResponse>(json)
            .unwrap()
            .into_result()
    }

    #[test]
    fn single_string_result() {
        let result = parse(r#"{"result": "hello there", "confidence": 0.93}"#);
        assert_eq!(result.text, "hello there");
        assert!((result.confidence - 0.93).abs() < f64::EPSILON);
    }

    #[test]
    fn segments_join_with_single_space() {
        let result = parse(r#"{"result": ["hello", "world"]}"#);
        assert_eq!(result.text, "hello world");
    }

    #[test]
    fn empty_string_is_no_speech() {
        let result = parse(r#"{"result": ""}"#);
        assert_eq!(result.text, "");
        assert!(result.is_empty());
    }

    #[test]
    fn empty_array_is_no_speech() {
        let result = parse(r#"{"result": []}"#);
        assert_eq!(result.text, "");
    }

    #[test]
    fn whitespace_only_is_no_speech() {
        let result = parse(r#"{"result": ["  ", "\n"]}"#);
        assert_eq!(result.text, "");
    }

    #[test]
    fn missing_result_is_no_speech() {
        let result = parse(r#"{}"#);
        assert_eq!(result.text, "");
    }

    #[test]
    fn confidence_defaults_to_zero() {
        let result = parse(r#"{"result": "hi"}"#);
        assert!((result.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let result = parse(r#"{"result": "  hello  "}"#);
        assert_eq!(result.text, "hello");
    }
}
