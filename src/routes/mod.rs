pub mod assessments;
pub mod candidates;
pub mod health;
pub mod jobs;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::AppState;

/// Builds the full API surface. The caller supplies the state and any
/// outer layers.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/reorder", patch(jobs::reorder_jobs))
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/api/jobs/:id/candidates", get(jobs::list_job_candidates))
        .route("/api/candidates", get(candidates::list_candidates))
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate).patch(candidates::update_candidate),
        )
        .route(
            "/api/candidates/:id/notes",
            post(candidates::add_candidate_note),
        )
        .route("/api/assessments", get(assessments::list_assessments))
        .route(
            "/api/assessments/:job_id",
            get(assessments::get_assessment)
                .put(assessments::save_assessment)
                .delete(assessments::delete_assessment),
        )
}
