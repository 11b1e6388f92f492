//! Sentiment API result: raw shape, validity predicate, typed form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw JSON object returned by the sentiment API.
///
/// Kept untyped because the API returns more fields than we store
/// (keywords, version, ...) and because a malformed reply must still be
/// loggable as-is.
pub type RawSentiment = Map<String, Value>;

/// Keys that must be present for a reply to count as a result.
pub const REQUIRED_KEYS: [&str; 3] = ["type", "score", "ratio"];

/// True iff `type`, `score` and `ratio` are all present and non-null.
///
/// Presence only: values are not range- or type-checked here.
pub fn is_valid_sentiment(raw: &RawSentiment) -> bool {
    REQUIRED_KEYS
        .iter()
        .all(|key| raw.get(*key).is_some_and(|v| !v.is_null()))
}

/// Render the reply's values as `"v1, v2, ..."` for error logs.
pub fn describe_values(raw: &RawSentiment) -> String {
    raw.values()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The (type, score, ratio) triple describing a text's classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
    pub ratio: f64,
}

impl SentimentResult {
    pub fn new(kind: impl Into<String>, score: f64, ratio: f64) -> Self {
        Self {
            kind: kind.into(),
            score,
            ratio,
        }
    }

    /// Convert a valid raw reply into the typed triple.
    ///
    /// Returns `None` when the reply is invalid or when `score`/`ratio` are
    /// not finite numbers (or numeric strings).
    pub fn from_raw(raw: &RawSentiment) -> Option<Self> {
        if !is_valid_sentiment(raw) {
            return None;
        }

        let kind = match raw.get("type")? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Some(Self {
            kind,
            score: number_from_value(raw.get("score")?)?,
            ratio: number_from_value(raw.get("ratio")?)?,
        })
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    // NaN / inf は REAL NOT NULL 列に入らない
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn raw(v: Value) -> RawSentiment {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[rstest]
    #[case::missing_type(json!({"score": 0.9, "ratio": 0.8}))]
    #[case::missing_score(json!({"type": "positive", "ratio": 0.8}))]
    #[case::missing_ratio(json!({"type": "positive", "score": 0.9}))]
    #[case::null_ratio(json!({"type": "positive", "score": 0.9, "ratio": null}))]
    #[case::empty(json!({}))]
    fn predicate_rejects_incomplete_replies(#[case] reply: Value) {
        assert!(!is_valid_sentiment(&raw(reply)));
    }

    #[rstest]
    #[case::typed(json!({"type": "positive", "score": 0.9, "ratio": 0.8}))]
    #[case::any_values(json!({"type": 1, "score": "x", "ratio": false}))]
    #[case::extra_fields(json!({"type": "neutral", "score": 0, "ratio": 0, "keywords": []}))]
    fn predicate_accepts_any_values_when_all_keys_present(#[case] reply: Value) {
        assert!(is_valid_sentiment(&raw(reply)));
    }

    #[test]
    fn from_raw_builds_typed_result() {
        let reply = raw(json!({"type": "positive", "score": 0.9, "ratio": "0.8"}));
        let result = SentimentResult::from_raw(&reply).unwrap();
        assert_eq!(result, SentimentResult::new("positive", 0.9, 0.8));
    }

    #[rstest]
    #[case::word(json!("high"))]
    #[case::nan(json!("NaN"))]
    #[case::infinity(json!("inf"))]
    #[case::negative_infinity(json!("-infinity"))]
    #[case::boolean(json!(true))]
    fn from_raw_rejects_non_finite_scores(#[case] score: Value) {
        let reply = raw(json!({"type": "positive", "score": score, "ratio": 0.8}));
        assert!(SentimentResult::from_raw(&reply).is_none());
    }

    #[test]
    fn describe_values_joins_with_commas() {
        let reply = raw(json!({"result_code": "400", "result_msg": "Bad text"}));
        assert_eq!(describe_values(&reply), "400, Bad text");
    }
}
