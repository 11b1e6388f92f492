//! Review snapshot and the queued message parsed from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::ReviewId;

/// A product review as handed over by the host platform's event dispatch.
///
/// The host owns the entity; we only see its field mapping and whether the
/// save that fired the event created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default)]
    pub is_new: bool,
}

impl Review {
    pub fn new(data: Map<String, Value>, is_new: bool) -> Self {
        Self { data, is_new }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// The parts of a queued review message the consumer cares about.
///
/// Parsed once per message; everything else in the field mapping is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewMessage {
    pub review_id: Option<ReviewId>,
    pub title: String,
    pub detail: String,
}

impl ReviewMessage {
    /// Parse a serialized review field mapping.
    ///
    /// `review_id` may be a JSON number or a numeric string. Missing or
    /// non-string `title`/`detail` become empty strings.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(raw)?;

        Ok(Self {
            review_id: fields.get("review_id").and_then(review_id_from_value),
            title: text_field(&fields, "title"),
            detail: text_field(&fields, "detail"),
        })
    }

    /// Text sent to the sentiment API: `"{title}: {detail}"`.
    pub fn analysis_text(&self) -> String {
        format!("{}: {}", self.title, self.detail)
    }
}

fn review_id_from_value(value: &Value) -> Option<ReviewId> {
    match value {
        Value::Number(n) => n.as_i64().map(ReviewId::new),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn parses_title_detail_and_numeric_review_id() {
        let raw = json!({"title": "Great", "detail": "Loved it", "review_id": 42}).to_string();
        let msg = ReviewMessage::parse(&raw).unwrap();

        assert_eq!(msg.review_id, Some(ReviewId::new(42)));
        assert_eq!(msg.analysis_text(), "Great: Loved it");
    }

    #[rstest]
    #[case::string_id(json!("42"), Some(42))]
    #[case::number_id(json!(42), Some(42))]
    #[case::garbage(json!("abc"), None)]
    #[case::null(json!(null), None)]
    fn review_id_accepts_numbers_and_numeric_strings(
        #[case] value: Value,
        #[case] expected: Option<i64>,
    ) {
        let raw = json!({"review_id": value, "title": "t", "detail": "d"}).to_string();
        let msg = ReviewMessage::parse(&raw).unwrap();
        assert_eq!(msg.review_id.map(|id| id.get()), expected);
    }

    #[test]
    fn missing_text_fields_become_empty() {
        let msg = ReviewMessage::parse(r#"{"review_id": 1}"#).unwrap();
        assert_eq!(msg.analysis_text(), ": ");
    }

    #[test]
    fn non_object_message_is_an_error() {
        assert!(ReviewMessage::parse("not json").is_err());
        assert!(ReviewMessage::parse("[1, 2]").is_err());
    }
}
