use jola_core::entities::Label;
use jola_core::rows::LabelRow;

use super::relations::LABELS;
use crate::error::DataError;
use crate::query::Select;
use crate::service::FeedbackService;

impl FeedbackService {
    /// Every label, in backend order.
    ///
    /// # Errors
    ///
    /// Remote failures after retry.
    pub async fn list_labels(&self) -> Result<Vec<Label>, DataError> {
        let rows: Vec<LabelRow> = self
            .fetch(&Select::from(LABELS).columns("label_key,label"))
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| Label {
                id: row.label_key,
                name: row.label,
            })
            .collect())
    }
}
