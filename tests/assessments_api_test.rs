use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use talentdesk::api::sim::{SimProfile, Simulation};
use talentdesk::database::store::Database;
use talentdesk::{routes, AppState};

fn test_app() -> axum::Router {
    let state = AppState::new(Database::in_memory(), Simulation::new(SimProfile::instant()));
    routes::api_router().with_state(state)
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

fn put_json(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn assessments_api_end_to_end() {
    let app = test_app();

    let resp = app
        .clone()
        .oneshot(get("/api/assessments/job-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = read_json(resp).await;
    assert_eq!(body["error"], "Assessment not found");

    let resp = app
        .clone()
        .oneshot(put_json(
            "/api/assessments/job-1",
            json!({
                "title": "Backend Screen",
                "description": "Core concepts",
                "sections": [
                    {
                        "id": "section-1",
                        "title": "Basics",
                        "description": "Warm-up questions",
                        "order": 0,
                        "questions": [
                            {
                                "id": "question-1",
                                "type": "single_choice",
                                "title": "Which statement describes ownership?",
                                "description": "",
                                "required": true,
                                "options": ["A", "B", "C"],
                                "correctAnswer": "A",
                                "order": 0
                            }
                        ]
                    }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let saved: JsonValue = read_json(resp).await;
    assert_eq!(saved["id"], "assessment-job-1");
    assert_eq!(saved["jobId"], "job-1");
    assert!(saved["createdAt"].is_string());

    let resp = app
        .clone()
        .oneshot(get("/api/assessments/job-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: JsonValue = read_json(resp).await;
    assert_eq!(fetched["title"], "Backend Screen");
    assert_eq!(
        fetched["sections"][0]["questions"][0]["correctAnswer"],
        "A"
    );

    // Saving again under the same job replaces, never duplicates.
    let resp = app
        .clone()
        .oneshot(put_json(
            "/api/assessments/job-1",
            json!({ "title": "Backend Screen v2", "sections": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(get("/api/assessments")).await.unwrap();
    let all: JsonValue = read_json(resp).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["title"], "Backend Screen v2");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/assessments/job-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: JsonValue = read_json(resp).await;
    assert_eq!(deleted["success"], true);

    let resp = app
        .clone()
        .oneshot(get("/api/assessments/job-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_job_with_no_assessment_is_a_404() {
    let app = test_app();

    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/assessments/job-9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = read_json(resp).await;
    assert_eq!(body["error"], "Assessment not found");
}
