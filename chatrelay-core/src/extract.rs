// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Extraction of the reply text from the remote API's response envelope.

use serde_json::Value;

/// Outcome of a chat exchange: the model's reply text, or an error detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    /// Reply text extracted from a success envelope.
    Text(String),
    /// Transport or API failure; the detail is surfaced to the caller.
    Error(String),
}

impl ApiReply {
    /// The carried text, whichever variant holds it.
    pub fn into_detail(self) -> String {
        match self {
            ApiReply::Text(text) | ApiReply::Error(text) => text,
        }
    }
}

/// Parse a raw response body into an [`ApiReply`].
///
/// A missing or empty `candidates` array means the envelope is an upstream
/// error payload; it is surfaced pretty-printed so callers see the upstream
/// diagnostic. A success envelope missing `content`/`parts`/`text` at the
/// expected position yields `Text("")` rather than an error.
pub fn extract(raw_body: &str) -> ApiReply {
    let parsed: Value = match serde_json::from_str(raw_body) {
        Ok(value) => value,
        Err(_) => return ApiReply::Error("Error parsing JSON response".to_string()),
    };

    match parsed.get("candidates").and_then(Value::as_array) {
        Some(candidates) if !candidates.is_empty() => {}
        _ => {
            let detail = serde_json::to_string_pretty(&parsed)
                .unwrap_or_else(|_| raw_body.to_string());
            return ApiReply::Error(detail);
        }
    }

    let text = parsed["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("");
    ApiReply::Text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_reply_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}]}}]}"#;
        assert_eq!(extract(raw), ApiReply::Text("Hello!".to_string()));
    }

    #[test]
    fn test_unparseable_body() {
        assert_eq!(
            extract("not json"),
            ApiReply::Error("Error parsing JSON response".to_string())
        );
    }

    #[test]
    fn test_error_envelope_surfaced_pretty() {
        let reply = extract(r#"{"error":"quota exceeded"}"#);
        match reply {
            ApiReply::Error(detail) => {
                assert_eq!(detail, "{\n  \"error\": \"quota exceeded\"\n}");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_candidates_is_error() {
        let reply = extract(r#"{"candidates":[]}"#);
        assert!(matches!(reply, ApiReply::Error(_)));
    }

    #[test]
    fn test_partial_success_envelope_yields_empty_text() {
        assert_eq!(
            extract(r#"{"candidates":[{}]}"#),
            ApiReply::Text(String::new())
        );
        assert_eq!(
            extract(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            ApiReply::Text(String::new())
        );
        assert_eq!(
            extract(r#"{"candidates":[{"content":{"parts":[{"data":1}]}}]}"#),
            ApiReply::Text(String::new())
        );
    }

    #[test]
    fn test_into_detail() {
        assert_eq!(ApiReply::Text("a".into()).into_detail(), "a");
        assert_eq!(ApiReply::Error("b".into()).into_detail(), "b");
    }
}
