use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use talentdesk::api::sim::{SimProfile, Simulation};
use talentdesk::database::store::Database;
use talentdesk::models::candidate::{Candidate, Stage};
use talentdesk::utils::time;
use talentdesk::{routes, AppState};

fn candidate(id: &str, name: &str, email: &str, job_id: &str, stage: Stage) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1 555 0100".to_string(),
        job_id: job_id.to_string(),
        stage,
        avatar: String::new(),
        location: "Remote".to_string(),
        experience: "5 years".to_string(),
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        applied_at: time::now(),
        notes: Vec::new(),
        timeline: Vec::new(),
    }
}

async fn seeded_app() -> (axum::Router, AppState) {
    let state = AppState::new(Database::in_memory(), Simulation::new(SimProfile::instant()));
    state
        .db
        .candidates
        .bulk_put(vec![
            candidate("cand-a", "Ada Lovelace", "ada@example.com", "job-1", Stage::Applied),
            candidate("cand-b", "Grace Hopper", "grace@example.com", "job-1", Stage::Screen),
            candidate("cand-c", "Alan Kay", "alan@example.com", "job-2", Stage::Tech),
        ])
        .await
        .unwrap();
    (routes::api_router().with_state(state.clone()), state)
}

async fn read_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn candidates_api_end_to_end() {
    let (app, _state) = seeded_app().await;

    let resp = app.clone().oneshot(get("/api/candidates")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: JsonValue = read_json(resp).await;
    assert_eq!(listing["candidates"].as_array().unwrap().len(), 3);
    assert_eq!(listing["pagination"]["totalItems"], 3);

    let resp = app
        .clone()
        .oneshot(get("/api/candidates?search=grace"))
        .await
        .unwrap();
    let matched: JsonValue = read_json(resp).await;
    assert_eq!(matched["candidates"].as_array().unwrap().len(), 1);
    assert_eq!(matched["candidates"][0]["name"], "Grace Hopper");

    let resp = app
        .clone()
        .oneshot(get("/api/candidates?stage=tech"))
        .await
        .unwrap();
    let staged: JsonValue = read_json(resp).await;
    assert_eq!(staged["candidates"].as_array().unwrap().len(), 1);
    assert_eq!(staged["candidates"][0]["id"], "cand-c");

    let resp = app
        .clone()
        .oneshot(get("/api/candidates/cand-a"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ada: JsonValue = read_json(resp).await;
    assert_eq!(ada["jobId"], "job-1");
    assert_eq!(ada["stage"], "applied");

    // Stage move as a one-field patch; the movedBy key is dropped.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/candidates/cand-a")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "stage": "screen", "movedBy": "user@company.com" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let moved: JsonValue = read_json(resp).await;
    assert_eq!(moved["stage"], "screen");
    assert!(moved.get("movedBy").is_none());

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/candidates/cand-a/notes")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "content": "Call tomorrow" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let note: JsonValue = read_json(resp).await;
    assert!(note["id"].as_str().unwrap().starts_with("note-"));
    assert_eq!(note["content"], "Call tomorrow");
    assert_eq!(note["createdBy"], "user@company.com");

    let resp = app
        .clone()
        .oneshot(get("/api/candidates/cand-a"))
        .await
        .unwrap();
    let ada: JsonValue = read_json(resp).await;
    assert_eq!(ada["notes"].as_array().unwrap().len(), 1);

    let resp = app
        .clone()
        .oneshot(get("/api/jobs/job-1/candidates"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let board: JsonValue = read_json(resp).await;
    assert_eq!(board.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn note_author_can_be_overridden() {
    let (app, _state) = seeded_app().await;

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/candidates/cand-b/notes")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "content": "Great pairing session", "createdBy": "lead@company.com" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let note: JsonValue = read_json(resp).await;
    assert_eq!(note["createdBy"], "lead@company.com");
}

#[tokio::test]
async fn missing_candidate_is_a_404() {
    let (app, _state) = seeded_app().await;

    let resp = app
        .oneshot(get("/api/candidates/cand-missing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = read_json(resp).await;
    assert_eq!(body["error"], "Candidate not found");
}
