use chrono::{DateTime, Utc};
use jola_core::dashboard::FeedbackFilter;
use jola_core::entities::FeedbackRecord;
use jola_core::enums::Sentiment;
use jola_core::text::{format_time_ago, truncate_text};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FeedbackCommands;
use crate::commands::shared::limit::truncate_to;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{TableRow, output, output_rows};
use crate::progress::with_spinner;

const CONTENT_WIDTH: usize = 80;

/// Handle `jola feedback`.
pub async fn handle(
    action: &FeedbackCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service()?;
    match action {
        FeedbackCommands::List {
            source,
            segment,
            sentiment,
        } => {
            let filter = build_filter(source.as_deref(), segment.as_deref(), sentiment.as_deref())?;
            let mut feedback =
                with_spinner("Loading feedback", service.list_feedback(&filter)).await?;
            truncate_to(&mut feedback, ctx.limit(flags)?);
            output_rows(&feedback, flags.format)
        }
        FeedbackCommands::Filters => {
            let options =
                with_spinner("Loading filters", service.feedback_filter_options()).await?;
            output(&options, flags.format)
        }
    }
}

fn build_filter(
    source: Option<&str>,
    segment: Option<&str>,
    sentiment: Option<&str>,
) -> anyhow::Result<FeedbackFilter> {
    Ok(FeedbackFilter {
        source: source.map(str::to_string),
        segment: segment.map(str::to_string),
        sentiment: sentiment
            .map(|raw| parse_enum::<Sentiment>(raw, "sentiment"))
            .transpose()?,
    })
}

impl TableRow for FeedbackRecord {
    fn headers() -> &'static [&'static str] {
        &["id", "when", "sentiment", "source", "segment", "content"]
    }

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.id.clone(),
            format_time_ago(self.created_at, now),
            self.sentiment_or_neutral().to_string(),
            self.source_or_unknown().to_string(),
            self.segment.clone().unwrap_or_else(|| "-".into()),
            truncate_text(&self.content, CONTENT_WIDTH),
        ]
    }
}
