use chrono::{DateTime, Utc};
use jola_core::entities::{Insight, Label};
use jola_core::text::truncate_text;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InsightCommands;
use crate::commands::shared::limit::truncate_to;
use crate::context::AppContext;
use crate::output::{TableRow, output_rows};
use crate::progress::with_spinner;

/// Handle `jola insights`.
pub async fn handle(
    action: &InsightCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service()?;
    match action {
        InsightCommands::List { label } => {
            let mut insights = match label.as_deref() {
                Some(key) => {
                    with_spinner("Loading insights", service.insights_by_label(key)).await?
                }
                None => with_spinner("Loading insights", service.list_insights()).await?,
            };
            truncate_to(&mut insights, ctx.limit(flags)?);
            output_rows(&insights, flags.format)
        }
        InsightCommands::Labels => {
            let labels = with_spinner("Loading labels", service.list_labels()).await?;
            output_rows(&labels, flags.format)
        }
    }
}

impl TableRow for Insight {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "labels", "content"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_text(self.title_or_untitled(), 40),
            self.labels().join(", "),
            truncate_text(&self.content, 60),
        ]
    }
}

impl TableRow for Label {
    fn headers() -> &'static [&'static str] {
        &["key", "name"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![self.id.clone(), self.name.clone().unwrap_or_else(|| "-".into())]
    }
}
