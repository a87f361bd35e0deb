use chrono::Utc;
use jola_core::dashboard::{FeedbackFilter, FilterOptions};
use jola_core::entities::FeedbackRecord;
use jola_core::rows::FeedbackRow;

use super::relations::FEEDBACKS;
use crate::error::DataError;
use crate::query::Select;
use crate::service::FeedbackService;

impl FeedbackService {
    /// All feedback matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Remote failures after retry.
    pub async fn list_feedback(
        &self,
        filter: &FeedbackFilter,
    ) -> Result<Vec<FeedbackRecord>, DataError> {
        let fetched_at = Utc::now();
        let rows: Vec<FeedbackRow> = self.fetch(&Select::from(FEEDBACKS)).await?;
        let mut records: Vec<FeedbackRecord> = rows
            .into_iter()
            .map(|row| row.into_record(fetched_at))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(filter.apply(records))
    }

    /// Distinct source / segment / sentiment values across all feedback.
    ///
    /// # Errors
    ///
    /// Remote failures after retry.
    pub async fn feedback_filter_options(&self) -> Result<FilterOptions, DataError> {
        let records = self.list_feedback(&FeedbackFilter::default()).await?;
        Ok(FilterOptions::from_records(&records))
    }
}
