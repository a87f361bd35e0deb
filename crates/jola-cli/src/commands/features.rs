use anyhow::bail;
use chrono::{DateTime, Utc};
use jola_core::entities::{FeatureEvidence, FeatureRequest};
use jola_core::text::{first_n_words, truncate_text};
use jola_data::{FeatureEvidenceQuery, QueryState};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FeatureCommands;
use crate::commands::shared::limit::truncate_to;
use crate::context::AppContext;
use crate::output::{TableRow, output_rows};
use crate::progress::{Progress, with_spinner};

const DESCRIPTION_WORDS: usize = 12;

/// Handle `jola features`.
pub async fn handle(
    action: &FeatureCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service()?;
    match action {
        FeatureCommands::List => {
            let mut requests =
                with_spinner("Loading feature requests", service.feature_requests()).await?;
            truncate_to(&mut requests, ctx.limit(flags)?);
            output_rows(&requests, flags.format)
        }
        FeatureCommands::Evidence { id } => {
            let mut query = FeatureEvidenceQuery::new();
            query.select(Some(id.as_str()));
            let progress = Progress::spinner("Loading evidence");
            let state = query.refresh(&service).await;
            progress.finish_clear();
            let mut evidence = match state {
                QueryState::Ready(evidence) => evidence.clone(),
                QueryState::Failed(message) => bail!("failed to load evidence for {id}: {message}"),
                QueryState::Idle | QueryState::Loading => Vec::new(),
            };
            truncate_to(&mut evidence, ctx.limit(flags)?);
            output_rows(&evidence, flags.format)
        }
    }
}

impl TableRow for FeatureRequest {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "role", "description"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_text(&self.title, 50),
            self.role.clone().unwrap_or_else(|| "-".into()),
            self.description
                .as_deref()
                .map_or_else(|| "-".into(), |text| first_n_words(text, DESCRIPTION_WORDS)),
        ]
    }
}

impl TableRow for FeatureEvidence {
    fn headers() -> &'static [&'static str] {
        &["id", "company", "role", "source", "quote"]
    }

    fn cells(&self, _now: DateTime<Utc>) -> Vec<String> {
        let or_dash = |value: Option<&String>| value.cloned().unwrap_or_else(|| "-".into());
        vec![
            self.id.clone(),
            or_dash(self.company.as_ref()),
            or_dash(self.role.as_ref()),
            or_dash(self.source.as_ref()),
            self.content
                .as_deref()
                .map_or_else(|| "-".into(), |text| truncate_text(text, 80)),
        ]
    }
}
