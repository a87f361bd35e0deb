use jola_core::dashboard::{DashboardSummary, FeedbackFilter};
use jola_core::rows::{ActionItemRow, InsightRow};

use super::relations::{ACTION_ITEMS, INSIGHTS};
use crate::error::DataError;
use crate::query::Select;
use crate::service::FeedbackService;

impl FeedbackService {
    /// Dashboard aggregates. Feedback, insight keys and action-item keys are
    /// fetched concurrently.
    ///
    /// # Errors
    ///
    /// The first remote failure.
    pub async fn dashboard_summary(&self, examples: usize) -> Result<DashboardSummary, DataError> {
        let filter = FeedbackFilter::default();
        let insights_query = Select::from(INSIGHTS).columns("insight_key");
        let items_query = Select::from(ACTION_ITEMS).columns("actionitem_key");
        let (feedback, insights, items) = tokio::try_join!(
            self.list_feedback(&filter),
            self.fetch::<InsightRow>(&insights_query),
            self.fetch::<ActionItemRow>(&items_query),
        )?;
        Ok(DashboardSummary::build(
            &feedback,
            insights.len() as u64,
            items.len() as u64,
            examples,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::repos::relations::FEEDBACKS;
    use crate::source::fake::FakeSource;

    #[tokio::test]
    async fn summary_counts_every_relation() {
        let (service, _) = FakeSource::default()
            .table(
                FEEDBACKS,
                vec![
                    json!({"feedback_key": 1, "sentiment": "Positive", "source": "Interview",
                           "Creation Date": "2024-04-01"}),
                    json!({"feedback_key": 2, "sentiment": "Negative", "source": "Interview",
                           "Creation Date": "2024-04-02"}),
                ],
            )
            .table(INSIGHTS, vec![json!({"insight_key": 1}), json!({"insight_key": 2})])
            .table(ACTION_ITEMS, vec![json!({"actionitem_key": 9})])
            .into_service();

        let summary = service.dashboard_summary(3).await.unwrap();
        assert_eq!(summary.counts.feedback, 2);
        assert_eq!(summary.counts.insights, 2);
        assert_eq!(summary.counts.action_items, 1);
        assert!((summary.counts.sentiment_score - 5.0).abs() < f64::EPSILON);
        assert_eq!(summary.time_series.len(), 2);
        assert_eq!(summary.source_distribution[0].value, 2);
        assert_eq!(summary.negative_examples[0].id, "2");
    }
}
