//! View-state holders for page queries.
//!
//! A [`Query`] remembers the outcome of its last fetch as a [`QueryState`].
//! Re-fetching is explicit through [`Query::refresh`]. A disabled query
//! stays [`QueryState::Idle`] and issues no request, which is how the
//! dependent evidence fetch waits for a feature selection.

use std::future::Future;

use jola_core::entities::FeatureEvidence;

use crate::error::DataError;
use crate::service::FeedbackService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Query<T> {
    state: QueryState<T>,
    enabled: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Query<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: QueryState::Idle,
            enabled: true,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState<T> {
        &self.state
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the query. Disabling drops any previous result.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = QueryState::Idle;
        }
    }

    /// Run `fetch` and store its outcome. Does nothing while disabled.
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> &QueryState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DataError>>,
    {
        if !self.enabled {
            return &self.state;
        }
        self.state = QueryState::Loading;
        self.state = match fetch().await {
            Ok(data) => QueryState::Ready(data),
            Err(error) => {
                tracing::warn!(%error, "query failed");
                QueryState::Failed(error.to_string())
            }
        };
        &self.state
    }
}

/// Evidence for the selected feature request. Disabled until a feature id is
/// selected; changing the selection discards the previous result.
#[derive(Debug, Clone)]
pub struct FeatureEvidenceQuery {
    selected: Option<String>,
    query: Query<Vec<FeatureEvidence>>,
}

impl Default for FeatureEvidenceQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEvidenceQuery {
    #[must_use]
    pub fn new() -> Self {
        let mut query = Query::new();
        query.set_enabled(false);
        Self {
            selected: None,
            query,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a feature (or clear the selection with `None` / a blank id).
    pub fn select(&mut self, feature_id: Option<&str>) {
        let next = feature_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if next != self.selected {
            self.query.set_enabled(false);
        }
        self.query.set_enabled(next.is_some());
        self.selected = next;
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState<Vec<FeatureEvidence>> {
        self.query.state()
    }

    /// Fetch evidence for the current selection. Without one, stays `Idle`.
    pub async fn refresh(&mut self, service: &FeedbackService) -> &QueryState<Vec<FeatureEvidence>> {
        let Some(feature_id) = self.selected.clone() else {
            return self.query.state();
        };
        self.query
            .refresh(|| async move { service.feature_evidence(&feature_id).await })
            .await
    }
}
