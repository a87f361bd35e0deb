use chrono::{DateTime, Utc};
use jola_core::dashboard::{DEFAULT_EXAMPLES, DashboardSummary, DistributionItem, TimeSeriesPoint};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{TableRow, output, render, render_rows};
use crate::progress::with_spinner;

/// Handle `jola dashboard`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = ctx.service()?;
    let summary =
        with_spinner("Building dashboard", service.dashboard_summary(DEFAULT_EXAMPLES)).await?;
    if flags.format == OutputFormat::Table {
        println!("{}", render_sections(&summary, Utc::now())?);
        return Ok(());
    }
    output(&summary, flags.format)
}

/// Table mode prints one titled table per dashboard panel.
fn render_sections(summary: &DashboardSummary, now: DateTime<Utc>) -> anyhow::Result<String> {
    let table = OutputFormat::Table;
    let sections = [
        ("Counts", render(&summary.counts, table)?),
        (
            "Sentiment",
            render_rows(&summary.sentiment_distribution, table, now)?,
        ),
        ("Sources", render_rows(&summary.source_distribution, table, now)?),
        ("Segments", render_rows(&summary.segment_distribution, table, now)?),
        ("Roles", render_rows(&summary.role_distribution, table, now)?),
        ("Feedback per day", render_rows(&summary.time_series, table, now)?),
        ("Positive examples", render_rows(&summary.positive_examples, table, now)?),
        ("Negative examples", render_rows(&summary.negative_examples, table, now)?),
    ];
    Ok(sections
        .iter()
        .map(|(title, body)| format!("{title}\n{body}"))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

impl TableRow for DistributionItem {
    fn headers() -> &'static [&'static str] {
        &["name", "count"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![self.name.clone(), self.value.to_string()]
    }
}

impl TableRow for TimeSeriesPoint {
    fn headers() -> &'static [&'static str] {
        &["date", "count"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![self.date.format("%Y-%m-%d").to_string(), self.count.to_string()]
    }
}
