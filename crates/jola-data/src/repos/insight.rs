use jola_core::entities::Insight;
use jola_core::grouping::{filter_insights_by_label, group_insight_labels};
use jola_core::rows::{InsightLabelLink, InsightRow, LabelRow};

use super::relations::{INSIGHT_LABELS, INSIGHTS, LABELS};
use crate::error::DataError;
use crate::join::join_insight_labels;
use crate::query::Select;
use crate::service::FeedbackService;

impl FeedbackService {
    /// Insights with their labels nested in `label_details`.
    ///
    /// # Errors
    ///
    /// Remote failures after retry on any of the three relations.
    pub async fn list_insights(&self) -> Result<Vec<Insight>, DataError> {
        let insights_query = Select::from(INSIGHTS);
        let links_query = Select::from(INSIGHT_LABELS).columns("insight_key,label_key");
        let labels_query = Select::from(LABELS).columns("label_key,label");
        let (insights, links, labels) = tokio::try_join!(
            self.fetch::<InsightRow>(&insights_query),
            self.fetch::<InsightLabelLink>(&links_query),
            self.fetch::<LabelRow>(&labels_query),
        )?;
        let rows = join_insight_labels(insights, &links, &labels);
        Ok(group_insight_labels(rows))
    }

    /// Insights carrying the label `label_key`.
    ///
    /// # Errors
    ///
    /// Remote failures after retry.
    pub async fn insights_by_label(&self, label_key: &str) -> Result<Vec<Insight>, DataError> {
        let insights = self.list_insights().await?;
        Ok(filter_insights_by_label(insights, label_key))
    }
}
