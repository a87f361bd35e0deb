//! Dashboard aggregates and feedback filtering.
//!
//! Everything here is computed client-side from already-fetched feedback so
//! the dashboard and the feedback hub share one notion of "distinct source",
//! "daily count", and so on.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::FeedbackRecord;
use crate::enums::Sentiment;

/// Number of example quotes shown per sentiment on the dashboard.
pub const DEFAULT_EXAMPLES: usize = 3;

/// One bar or slice in a distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DistributionItem {
    pub name: String,
    pub value: u64,
}

/// Feedback volume for one calendar day (UTC).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardCounts {
    pub feedback: u64,
    pub insights: u64,
    pub action_items: u64,
    /// 0–10 score; positive counts fully, mixed and neutral count half.
    pub sentiment_score: f64,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardSummary {
    pub counts: DashboardCounts,
    pub time_series: Vec<TimeSeriesPoint>,
    pub sentiment_distribution: Vec<DistributionItem>,
    pub source_distribution: Vec<DistributionItem>,
    pub segment_distribution: Vec<DistributionItem>,
    pub role_distribution: Vec<DistributionItem>,
    pub positive_examples: Vec<FeedbackRecord>,
    pub negative_examples: Vec<FeedbackRecord>,
}

impl DashboardSummary {
    /// Aggregate fetched feedback plus the insight/action-item totals.
    #[must_use]
    pub fn build(
        feedback: &[FeedbackRecord],
        insights: u64,
        action_items: u64,
        examples: usize,
    ) -> Self {
        Self {
            counts: DashboardCounts {
                feedback: feedback.len() as u64,
                insights,
                action_items,
                sentiment_score: sentiment_score(feedback),
            },
            time_series: daily_counts(feedback),
            sentiment_distribution: sentiment_distribution(feedback),
            source_distribution: distribution_by(feedback, |r| r.source.as_deref()),
            segment_distribution: distribution_by(feedback, |r| r.segment.as_deref()),
            role_distribution: distribution_by(feedback, |r| r.role.as_deref()),
            positive_examples: examples_for(feedback, Sentiment::Positive, examples),
            negative_examples: examples_for(feedback, Sentiment::Negative, examples),
        }
    }
}

/// Count feedback per sentiment, in [`Sentiment::ALL`] order, omitting zeros.
/// Untagged feedback counts as neutral.
#[must_use]
pub fn sentiment_distribution(feedback: &[FeedbackRecord]) -> Vec<DistributionItem> {
    let mut counts: HashMap<Sentiment, u64> = HashMap::new();
    for record in feedback {
        *counts.entry(record.sentiment_or_neutral()).or_default() += 1;
    }
    Sentiment::ALL
        .iter()
        .filter_map(|sentiment| {
            counts.get(sentiment).map(|&value| DistributionItem {
                name: sentiment.as_str().to_string(),
                value,
            })
        })
        .collect()
}

/// Count feedback by an optional string attribute. Missing values are
/// skipped. Sorted by count (descending), ties keep first-appearance order.
pub fn distribution_by<'a>(
    feedback: &'a [FeedbackRecord],
    attribute: impl Fn(&'a FeedbackRecord) -> Option<&'a str>,
) -> Vec<DistributionItem> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for value in feedback.iter().filter_map(attribute) {
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }
    let mut items: Vec<DistributionItem> = order
        .into_iter()
        .map(|name| DistributionItem {
            name: name.to_string(),
            value: counts[name],
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items
}

/// Feedback count per UTC calendar day, oldest first.
#[must_use]
pub fn daily_counts(feedback: &[FeedbackRecord]) -> Vec<TimeSeriesPoint> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in feedback {
        *days.entry(record.created_at.date_naive()).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, count)| TimeSeriesPoint { date, count })
        .collect()
}

/// Sentiment score on a 0–10 scale, rounded to one decimal. Empty input is 0.
#[must_use]
pub fn sentiment_score(feedback: &[FeedbackRecord]) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }
    let points: f64 = feedback
        .iter()
        .map(|record| match record.sentiment_or_neutral() {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => 0.0,
            Sentiment::Mixed | Sentiment::Neutral => 0.5,
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let score = points * 10.0 / feedback.len() as f64;
    (score * 10.0).round() / 10.0
}

/// Most recent feedback with the given sentiment.
fn examples_for(
    feedback: &[FeedbackRecord],
    sentiment: Sentiment,
    limit: usize,
) -> Vec<FeedbackRecord> {
    let mut matching: Vec<FeedbackRecord> = feedback
        .iter()
        .filter(|record| record.sentiment == Some(sentiment))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching.truncate(limit);
    matching
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Distinct filter values present in a feedback list, in first-appearance
/// order. Empty values never appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FilterOptions {
    pub sources: Vec<String>,
    pub segments: Vec<String>,
    pub sentiments: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_records(feedback: &[FeedbackRecord]) -> Self {
        let mut options = Self::default();
        for record in feedback {
            push_distinct(&mut options.sources, record.source.as_deref());
            push_distinct(&mut options.segments, record.segment.as_deref());
            push_distinct(
                &mut options.sentiments,
                record.sentiment.map(Sentiment::as_str),
            );
        }
        options
    }
}

fn push_distinct(values: &mut Vec<String>, candidate: Option<&str>) {
    let Some(value) = candidate.map(str::trim).filter(|v| !v.is_empty()) else {
        return;
    };
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

/// Active feedback filter. `None` on a field means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub source: Option<String>,
    pub segment: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl FeedbackFilter {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.source.is_some() || self.segment.is_some() || self.sentiment.is_some()
    }

    #[must_use]
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        let source_ok = self
            .source
            .as_deref()
            .is_none_or(|source| record.source.as_deref() == Some(source));
        let segment_ok = self
            .segment
            .as_deref()
            .is_none_or(|segment| record.segment.as_deref() == Some(segment));
        let sentiment_ok = self
            .sentiment
            .is_none_or(|sentiment| record.sentiment_or_neutral() == sentiment);
        source_ok && segment_ok && sentiment_ok
    }

    #[must_use]
    pub fn apply(&self, feedback: Vec<FeedbackRecord>) -> Vec<FeedbackRecord> {
        if !self.is_active() {
            return feedback;
        }
        feedback.into_iter().filter(|r| self.matches(r)).collect()
    }
}
