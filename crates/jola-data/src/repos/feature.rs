use jola_core::entities::{FeatureEvidence, FeatureRequest};
use jola_core::rows::{FeatureEvidenceRow, FeatureRequestRow};

use super::relations::{
    FEATURE_EVIDENCE, FEATURE_REQUESTS, RPC_FEATURE_EVIDENCE, RPC_FEATURE_REQUESTS,
};
use crate::error::DataError;
use crate::query::{Rpc, Select};
use crate::service::FeedbackService;

impl FeedbackService {
    /// Feature requests, via the `get_feature_requests` procedure or, when
    /// that call fails, a direct select on `feature_requests`.
    ///
    /// # Errors
    ///
    /// The fallback select's error when both paths fail.
    pub async fn feature_requests(&self) -> Result<Vec<FeatureRequest>, DataError> {
        let rows: Vec<FeatureRequestRow> = match self.call(&Rpc::new(RPC_FEATURE_REQUESTS)).await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(%error, "procedure unavailable, selecting {FEATURE_REQUESTS} directly");
                self.fetch(&Select::from(FEATURE_REQUESTS)).await?
            }
        };
        Ok(rows.into_iter().map(FeatureRequestRow::into_request).collect())
    }

    /// Evidence quotes for one feature request. A blank id yields no rows
    /// and issues no request.
    ///
    /// # Errors
    ///
    /// The fallback select's error when both paths fail.
    pub async fn feature_evidence(
        &self,
        feature_id: &str,
    ) -> Result<Vec<FeatureEvidence>, DataError> {
        let feature_id = feature_id.trim();
        if feature_id.is_empty() {
            return Ok(Vec::new());
        }
        let rpc = Rpc::new(RPC_FEATURE_EVIDENCE).arg("p_feature_id", feature_id);
        let rows: Vec<FeatureEvidenceRow> = match self.call(&rpc).await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(%error, "procedure unavailable, selecting {FEATURE_EVIDENCE} directly");
                self.fetch(&Select::from(FEATURE_EVIDENCE).eq("feature_id", feature_id))
                    .await?
            }
        };
        Ok(rows.into_iter().map(FeatureEvidenceRow::into_evidence).collect())
    }
}
