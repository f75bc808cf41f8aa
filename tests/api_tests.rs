use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use movie_match_api::{
    api::{create_router, AppState},
    models::{CatalogRow, DetailRecord},
    services::{PosterResolver, RecommendationService},
    store::{CatalogStore, LoadState, SimilarityMatrix},
};

struct FixedPosters;

#[async_trait::async_trait]
impl PosterResolver for FixedPosters {
    async fn fetch_poster(&self, movie_id: i64) -> String {
        format!("https://image.test/{}.jpg", movie_id)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn detail(value: Value) -> DetailRecord {
    serde_json::from_value(value).unwrap()
}

fn ready_state() -> LoadState {
    let rows = vec![
        CatalogRow {
            movie_id: 101,
            title: "Alpha".to_string(),
        },
        CatalogRow {
            movie_id: 102,
            title: "Beta".to_string(),
        },
        CatalogRow {
            movie_id: 103,
            title: "Gamma".to_string(),
        },
    ];
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.2],
        vec![0.9, 1.0, 0.5],
        vec![0.2, 0.5, 1.0],
    ])
    .unwrap();
    let details = vec![
        detail(json!({
            "movie_id": 102,
            "title": "Beta",
            "genres": "['Drama', 'Crime']",
            "cast": "['Al Pacino']",
            "crew": "['Michael Mann']",
            "runtime": 170,
            "vote_average": 7.9,
            "release_date": "1995-12-15"
        })),
        detail(json!({ "movie_id": 103, "title": "Gamma", "crew": null })),
    ];

    LoadState::Ready(Arc::new(CatalogStore::new(rows, matrix, details).unwrap()))
}

fn app(state: LoadState, k: usize) -> Router {
    let service = RecommendationService::new(state, Arc::new(FixedPosters), k);
    create_router(AppState::new(service, 50))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, &body.to_string())
}

fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(app(ready_state(), 10), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommend_returns_ranked_details() {
    let (status, body) = send(
        app(ready_state(), 2),
        post_json("/recommend", json!({ "movie": "alpha" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let movies = body.as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["movie_id"], 102);
    assert_eq!(movies[0]["genres"], json!(["Drama", "Crime"]));
    assert_eq!(movies[0]["director"], "Michael Mann");
    assert_eq!(movies[0]["year"], "1995");
    assert_eq!(movies[0]["poster"], "https://image.test/102.jpg");
    assert_eq!(movies[1]["movie_id"], 103);
    assert_eq!(movies[1]["director"], "Unknown Director");
}

#[tokio::test]
async fn test_recommend_unknown_title_is_not_found() {
    let (status, body) = send(
        app(ready_state(), 2),
        post_json("/recommend", json!({ "movie": "Unknown Title XYZ" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_recommend_without_details_is_distinct_error() {
    // Beta's single nearest neighbor is Alpha, which has no detail record
    let (status, body) = send(
        app(ready_state(), 1),
        post_json("/recommend", json!({ "movie": "Beta" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_valid_recommendations");
}

#[tokio::test]
async fn test_recommend_empty_movie_is_not_found() {
    let (status, body) = send(
        app(ready_state(), 2),
        post_json("/recommend", json!({ "movie": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_recommend_missing_movie_field_is_not_found() {
    let (status, body) = send(app(ready_state(), 2), post_json("/recommend", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_recommend_empty_movie_while_unloaded_is_unavailable() {
    let failed = LoadState::Failed(vec!["Missing required catalog artifact".to_string()]);

    let (status, body) = send(
        app(failed, 2),
        post_json("/recommend", json!({ "movie": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "data_unavailable");
}

#[tokio::test]
async fn test_recommend_malformed_body_uses_error_envelope() {
    let (status, body) = send(app(ready_state(), 2), post_raw("/recommend", "{\"movie\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_titles_bad_limit_uses_error_envelope() {
    let (status, body) = send(app(ready_state(), 10), get("/recommend?limit=abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_movie_detail_routes() {
    let (status, body) = send(app(ready_state(), 10), get("/movie/102")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Beta");
    assert_eq!(body["runtime"], 170.0);

    let (status, body) = send(app(ready_state(), 10), get("/recommend/103")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Gamma");

    let (status, _) = send(app(ready_state(), 10), get("/movie/101")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_movie() {
    let (status, body) = send(app(ready_state(), 10), get("/random")).await;
    assert_eq!(status, StatusCode::OK);
    let movie_id = body["movie_id"].as_i64().unwrap();
    assert!(movie_id == 102 || movie_id == 103);
}

#[tokio::test]
async fn test_list_titles() {
    let (status, body) = send(app(ready_state(), 10), get("/recommend?search=A&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["filtered_count"], 3);
    assert_eq!(
        body["entries"],
        json!([
            { "title": "Alpha", "movie_id": 101 },
            { "title": "Beta", "movie_id": 102 }
        ])
    );
}

#[tokio::test]
async fn test_status_reports_load_errors() {
    let failed = LoadState::Failed(vec![
        "Missing required similarity artifact: data/similarity.json".to_string(),
    ]);

    let (status, body) = send(app(failed.clone(), 10), get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        app(failed, 10),
        post_json("/recommend", json!({ "movie": "Alpha" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "data_unavailable");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-123")
        .body(Body::empty())
        .unwrap();
    let response = app(ready_state(), 10).oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-123");

    let response = app(ready_state(), 10).oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
