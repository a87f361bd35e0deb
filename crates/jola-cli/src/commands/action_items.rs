use chrono::{DateTime, Utc};
use jola_core::entities::ActionItem;
use jola_core::text::{format_time_ago, truncate_text};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ActionItemCommands;
use crate::commands::shared::limit::truncate_to;
use crate::context::AppContext;
use crate::output::{TableRow, output_rows};
use crate::progress::with_spinner;

/// Handle `jola action-items`.
pub async fn handle(
    action: &ActionItemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let ActionItemCommands::List = action;
    let service = ctx.service()?;
    let mut items = with_spinner("Loading action items", service.list_action_items()).await?;
    truncate_to(&mut items, ctx.limit(flags)?);
    output_rows(&items, flags.format)
}

impl TableRow for ActionItem {
    fn headers() -> &'static [&'static str] {
        &["id", "when", "insights", "content"]
    }

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        let insights = self
            .related_insights
            .iter()
            .map(|insight| insight.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            self.id.clone(),
            format_time_ago(self.created_at, now),
            insights,
            truncate_text(&self.content, 80),
        ]
    }
}
