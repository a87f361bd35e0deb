//! Fixed record types for rows returned by remote queries.
//!
//! The backend hands back loosely-typed JSON objects. Each relation and each
//! join gets its own record here so a row missing a required key fails to
//! decode (and is skipped by the caller) instead of flowing through as an
//! undefined value. Keys arrive as integers from some relations and strings
//! from others; both are normalised to `String`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{FeatureEvidence, FeatureRequest, FeedbackRecord};
use crate::enums::Sentiment;
use crate::errors::CoreError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Str(String),
}

impl RawKey {
    fn into_key(self) -> Option<String> {
        match self {
            Self::Int(value) => Some(value.to_string()),
            Self::Str(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

/// Deserialize a required key that may be an integer or a string.
///
/// # Errors
///
/// Fails when the value is null, empty, or neither an integer nor a string.
pub fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawKey::deserialize(deserializer)?
        .into_key()
        .ok_or_else(|| serde::de::Error::custom("key is empty"))
}

/// Deserialize an optional key. Null and empty strings both become `None`.
///
/// # Errors
///
/// Fails when the value is neither null, an integer, nor a string.
pub fn deserialize_opt_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawKey>::deserialize(deserializer)?.and_then(RawKey::into_key))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(serde::de::IgnoredAny),
}

/// Deserialize a free-text attribute leniently. Numbers and booleans are
/// rendered as text; null, blank strings and nested values become `None`.
/// Never fails, so one odd attribute cannot drop its row.
///
/// # Errors
///
/// Only if the underlying deserializer itself fails.
pub fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Str(value)) => Some(value),
        Some(RawText::Int(value)) => Some(value.to_string()),
        Some(RawText::Float(value)) => Some(value.to_string()),
        Some(RawText::Bool(value)) => Some(value.to_string()),
        Some(RawText::Other(_)) | None => None,
    };
    Ok(non_empty(text))
}

/// Parse a timestamp column.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.f]` (no
/// offset, read as UTC), and bare `YYYY-MM-DD` dates (midnight UTC).
///
/// # Errors
///
/// Returns `CoreError::Validation` if no format matches.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("unrecognised timestamp '{s}'")))
}

/// Resolve an optional timestamp column, falling back to `fallback` when it is
/// missing or unparseable.
#[must_use]
pub fn timestamp_or(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_timestamp(s).unwrap_or_else(|error| {
            tracing::warn!(%error, "falling back to fetch time");
            fallback
        }),
        _ => fallback,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an optional timestamp column; missing or unparseable is `None`.
fn optional_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match parse_timestamp(raw) {
        Ok(ts) => Some(ts),
        Err(error) => {
            tracing::warn!(%error, "dropping unparseable timestamp");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Base relations
// ---------------------------------------------------------------------------

/// Row of the `feedbacks` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub feedback_key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, rename = "Creation Date", alias = "created_at")]
    pub creation_date: Option<String>,
}

impl FeedbackRow {
    /// Normalise into the view model. `fetched_at` stands in for a missing
    /// creation date.
    #[must_use]
    pub fn into_record(self, fetched_at: DateTime<Utc>) -> FeedbackRecord {
        let created_at = timestamp_or(self.creation_date.as_deref(), fetched_at);
        FeedbackRecord {
            id: self.feedback_key,
            content: self.content.unwrap_or_default(),
            sentiment: self.sentiment.as_deref().and_then(Sentiment::parse),
            source: non_empty(self.source),
            segment: non_empty(self.segment),
            client: non_empty(self.client),
            role: non_empty(self.role),
            company: non_empty(self.company),
            created_at,
        }
    }
}

/// Row of the `insights` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub insight_key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
}

/// Row of the `labels` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub label_key: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Row of the `insight_labels` link relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightLabelLink {
    #[serde(deserialize_with = "deserialize_key")]
    pub insight_key: String,
    #[serde(deserialize_with = "deserialize_key")]
    pub label_key: String,
}

/// Row of the `action_items` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub actionitem_key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Row of the `actionitems_insights` link relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemInsightLink {
    #[serde(deserialize_with = "deserialize_key")]
    pub actionitem_key: String,
    #[serde(deserialize_with = "deserialize_key")]
    pub insight_key: String,
}

/// Row of `feature_requests` (or of the `get_feature_requests` procedure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequestRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub created_at: Option<String>,
}

impl FeatureRequestRow {
    #[must_use]
    pub fn into_request(self) -> FeatureRequest {
        FeatureRequest {
            created_at: optional_timestamp(self.created_at.as_deref()),
            id: self.id,
            role: self.role,
            title: self.title.unwrap_or_default(),
            description: self.description,
        }
    }
}

/// Row of `feature_evidence` (or of the `get_feature_evidence` procedure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEvidenceRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_key")]
    pub feature_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub company_arr: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub employee_count: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_key")]
    pub feedback_key: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub file_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub detailed_role: Option<String>,
}

impl FeatureEvidenceRow {
    #[must_use]
    pub fn into_evidence(self) -> FeatureEvidence {
        FeatureEvidence {
            id: self.id,
            feature_id: self.feature_id,
            content: self.content,
            company: self.company,
            company_arr: self.company_arr,
            employee_count: self.employee_count,
            feedback_key: self.feedback_key,
            file_id: self.file_id,
            name: self.name,
            role: self.role,
            source: self.source,
            detailed_role: self.detailed_role,
        }
    }
}

// ---------------------------------------------------------------------------
// Join rows (one row per parent × child pair)
// ---------------------------------------------------------------------------

/// Flat insight × label row. `label_key` is `None` for an insight with no
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightLabelRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub insight_key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_key")]
    pub label_key: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Flat action-item × insight row. `insight_key` is `None` for an action item
/// with no related insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemInsightRow {
    #[serde(deserialize_with = "deserialize_key")]
    pub actionitem_key: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_key")]
    pub insight_key: Option<String>,
    #[serde(default)]
    pub insight_content: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_and_string_keys_both_decode() {
        let from_int: InsightRow = serde_json::from_value(json!({"insight_key": 7})).unwrap();
        let from_str: InsightRow = serde_json::from_value(json!({"insight_key": "7"})).unwrap();
        assert_eq!(from_int.insight_key, "7");
        assert_eq!(from_str.insight_key, "7");
    }

    #[test]
    fn missing_required_key_fails() {
        let result = serde_json::from_value::<InsightRow>(json!({"content": "orphan"}));
        assert!(result.is_err());
        let result = serde_json::from_value::<InsightRow>(json!({"insight_key": null}));
        assert!(result.is_err());
        let result = serde_json::from_value::<InsightRow>(json!({"insight_key": "  "}));
        assert!(result.is_err());
    }

    #[test]
    fn optional_child_key_treats_empty_as_absent() {
        let row: InsightLabelRow =
            serde_json::from_value(json!({"insight_key": 1, "label_key": ""})).unwrap();
        assert_eq!(row.label_key, None);
        let row: InsightLabelRow =
            serde_json::from_value(json!({"insight_key": 1, "label_key": null})).unwrap();
        assert_eq!(row.label_key, None);
        let row: InsightLabelRow =
            serde_json::from_value(json!({"insight_key": 1, "label_key": 4})).unwrap();
        assert_eq!(row.label_key.as_deref(), Some("4"));
    }

    #[test]
    fn title_column_alias() {
        let row: InsightRow =
            serde_json::from_value(json!({"insight_key": 2, "Title": "Slow exports"})).unwrap();
        assert_eq!(row.title.as_deref(), Some("Slow exports"));
    }

    #[test]
    fn parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-09T14:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-09T14:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-09 14:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-09T14:30:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-03-09").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("last tuesday").is_err());
    }

    #[test]
    fn feedback_row_normalises_defaults() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let row: FeedbackRow = serde_json::from_value(json!({
            "feedback_key": 12,
            "content": null,
            "source": "",
            "segment": "Enterprise",
            "sentiment": "Positive",
            "Creation Date": "2024-04-02 10:00:00"
        }))
        .unwrap();

        let record = row.into_record(fetched_at);
        assert_eq!(record.id, "12");
        assert_eq!(record.content, "");
        assert_eq!(record.source, None);
        assert_eq!(record.source_or_unknown(), "Unknown");
        assert_eq!(record.segment.as_deref(), Some("Enterprise"));
        assert_eq!(record.sentiment, Some(Sentiment::Positive));
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn feedback_row_without_date_uses_fetch_time() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let row: FeedbackRow =
            serde_json::from_value(json!({"feedback_key": "f-1", "Creation Date": "garbage"}))
                .unwrap();
        let record = row.into_record(fetched_at);
        assert_eq!(record.created_at, fetched_at);
        assert_eq!(record.sentiment, None);
        assert_eq!(record.sentiment_or_neutral(), Sentiment::Neutral);
    }

    #[test]
    fn feature_request_row_tolerates_odd_attributes() {
        let naive: FeatureRequestRow = serde_json::from_value(json!({
            "id": "fr-1",
            "created_at": "2024-04-02T10:00:00"
        }))
        .unwrap();
        let request = naive.into_request();
        assert_eq!(
            request.created_at,
            Some(Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap())
        );
        assert_eq!(request.title, "");

        let odd: FeatureRequestRow = serde_json::from_value(json!({
            "id": 2,
            "title": null,
            "role": 7,
            "created_at": "sometime"
        }))
        .unwrap();
        let request = odd.into_request();
        assert_eq!(request.id, "2");
        assert_eq!(request.title, "");
        assert_eq!(request.role.as_deref(), Some("7"));
        assert_eq!(request.created_at, None);
    }

    #[test]
    fn feature_evidence_row_renders_numbers_as_text() {
        let row: FeatureEvidenceRow = serde_json::from_value(json!({
            "id": 9,
            "feature_id": 3,
            "company_arr": 1_500_000,
            "employee_count": 120,
            "file_id": {"bucket": "uploads"},
            "name": "  ",
            "source": "Interview"
        }))
        .unwrap();
        let evidence = row.into_evidence();
        assert_eq!(evidence.feature_id.as_deref(), Some("3"));
        assert_eq!(evidence.company_arr.as_deref(), Some("1500000"));
        assert_eq!(evidence.employee_count.as_deref(), Some("120"));
        assert_eq!(evidence.file_id, None);
        assert_eq!(evidence.name, None);
        assert_eq!(evidence.source.as_deref(), Some("Interview"));
    }
}
