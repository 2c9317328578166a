use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use lexscan_core::{ExtractedEntity, ExtractionReport, PipelineError};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract_entities", post(extract_entities))
        .route("/extract_entities_with_stats", post(extract_entities_with_stats))
}

#[derive(Debug, Deserialize)]
pub struct DocumentInput {
    pub text: String,
}

async fn extract_entities(
    State(state): State<AppState>,
    Json(document): Json<DocumentInput>,
) -> Result<Json<Vec<ExtractedEntity>>, (StatusCode, String)> {
    state
        .pipeline
        .run(&document.text)
        .await
        .map(Json)
        .map_err(internal_error)
}

async fn extract_entities_with_stats(
    State(state): State<AppState>,
    Json(document): Json<DocumentInput>,
) -> Result<Json<ExtractionReport>, (StatusCode, String)> {
    state
        .pipeline
        .run_with_stats(&document.text)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// Full detail stays in the server log; the client only learns the failure
/// class.
fn internal_error(err: PipelineError) -> (StatusCode, String) {
    tracing::error!(error = %err, "entity extraction failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error processing document".to_string(),
    )
}
