use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        AddNotePayload, CandidateListQuery, CandidateListResponse, UpdateCandidatePayload,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let page = state.candidates_api.list(&query).await?;
    Ok(Json(CandidateListResponse::from(page)))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidates_api.get(&id).await?;
    Ok(Json(candidate))
}

// Stage moves arrive here too, as a one-field patch. A `movedBy` key in the
// body is accepted and dropped during deserialization.
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidates_api.update(&id, payload).await?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn add_candidate_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddNotePayload>,
) -> Result<impl IntoResponse> {
    let note = state
        .candidates_api
        .add_note(&id, payload.content, payload.created_by)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}
