use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::parsing::ParsedResume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    #[serde(default)]
    pub raw_text: String,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    let parsed = state.parser.parse(&req.raw_text).await?;
    Ok(Json(parsed))
}
