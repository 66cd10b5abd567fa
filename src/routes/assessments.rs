use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{dto::assessment_dto::SaveAssessmentPayload, error::Result, AppState};

#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assessments = state.assessments_api.list_all().await?;
    Ok(Json(assessments))
}

#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessments_api.get_by_job_id(&job_id).await?;
    Ok(Json(assessment))
}

// PUT is an upsert: the job either gets its first assessment or the stored
// one is replaced under the same job id.
#[axum::debug_handler]
pub async fn save_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(payload): Json<SaveAssessmentPayload>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .assessments_api
        .save(payload.into_assessment(job_id))
        .await?;
    Ok(Json(assessment))
}

#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.assessments_api.delete_by_job_id(&job_id).await?;
    Ok(Json(json!({ "success": true })))
}
