use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{CandidateProfile, SourceBundle, ValidationResult};
use crate::parsing::FALLBACK_PROVIDER_ID;
use crate::reconcile::pipeline::SourcesUsed;
use crate::reconcile::ReconcileError;
use crate::state::AppState;

fn default_use_providers() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    #[serde(flatten)]
    pub bundle: SourceBundle,
    /// Run the generative path when the bundle carries no provider output.
    #[serde(default = "default_use_providers")]
    pub use_providers: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileMetadata {
    pub sources_used: SourcesUsed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub processing_time_ms: u64,
    pub request_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    pub profile: CandidateProfile,
    pub validation: ValidationResult,
    pub metadata: ReconcileMetadata,
}

/// POST /api/v1/resumes/reconcile
pub async fn handle_reconcile(
    State(state): State<AppState>,
    Json(req): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, AppError> {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let mut bundle = req.bundle;

    if bundle.raw_text.trim().is_empty() {
        return Err(ReconcileError::EmptyInput.into());
    }

    let mut provider_id = None;
    if bundle.provider_output.is_none() && req.use_providers && state.parser.has_providers() {
        let parsed = state.parser.parse(&bundle.raw_text).await?;
        // A fallback record is derived from the same raw text and adds nothing.
        if parsed.provider_id != FALLBACK_PROVIDER_ID {
            bundle.provider_output =
                Some(serde_json::to_value(&parsed.record).map_err(anyhow::Error::from)?);
        }
        debug!(%request_id, provider = %parsed.provider_id, "Generative pass finished");
        provider_id = Some(parsed.provider_id);
    }

    let reconciliation = state.reconciler.reconcile(&bundle)?;
    let processing_time_ms = started.elapsed().as_millis() as u64;
    info!(
        %request_id,
        elapsed_ms = processing_time_ms,
        confidence = reconciliation.validation.confidence,
        "Reconcile request served"
    );

    Ok(Json(ReconcileResponse {
        profile: reconciliation.profile,
        validation: reconciliation.validation,
        metadata: ReconcileMetadata {
            sources_used: reconciliation.sources_used,
            provider_id,
            processing_time_ms,
            request_id,
        },
    }))
}
