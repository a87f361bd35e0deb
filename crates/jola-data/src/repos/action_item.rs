use chrono::Utc;
use jola_core::entities::ActionItem;
use jola_core::grouping::group_action_item_insights;
use jola_core::rows::{ActionItemInsightLink, ActionItemRow, InsightRow};

use super::relations::{ACTION_ITEM_INSIGHTS, ACTION_ITEMS, INSIGHTS};
use crate::error::DataError;
use crate::join::join_action_item_insights;
use crate::query::Select;
use crate::service::FeedbackService;

impl FeedbackService {
    /// Action items with their related insights.
    ///
    /// # Errors
    ///
    /// Remote failures after retry on any of the three relations.
    pub async fn list_action_items(&self) -> Result<Vec<ActionItem>, DataError> {
        let fetched_at = Utc::now();
        let items_query = Select::from(ACTION_ITEMS);
        let links_query = Select::from(ACTION_ITEM_INSIGHTS).columns("actionitem_key,insight_key");
        let insights_query = Select::from(INSIGHTS).columns("insight_key,content");
        let (items, links, insights) = tokio::try_join!(
            self.fetch::<ActionItemRow>(&items_query),
            self.fetch::<ActionItemInsightLink>(&links_query),
            self.fetch::<InsightRow>(&insights_query),
        )?;
        let rows = join_action_item_insights(items, &links, &insights);
        Ok(group_action_item_insights(rows, fetched_at))
    }
}
