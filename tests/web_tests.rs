//! HTTP API tests
//!
//! Requests are driven straight through the router, so no socket is bound and
//! per-IP rate limiting (which needs the peer address) is not in play.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use genome_matcher::utils::validation::MAX_QUERY_SEQUENCE_LENGTH;
use genome_matcher::web::server::{create_router, AppState, MAX_REQUEST_BODY_SIZE};
use genome_matcher::{Genome, GenomeIndex};

fn test_router() -> Router {
    let mut index = GenomeIndex::new(4).expect("valid search length");
    index.add_genome(&Genome::new("A", "ACGTACGT"));
    index.add_genome(&Genome::new("B", "ACGTTCGT"));
    create_router(Arc::new(AppState { index }))
}

async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_genomes_endpoint() {
    let request = Request::builder()
        .uri("/api/genomes")
        .body(Body::empty())
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["min_search_length"], 4);
    assert_eq!(json["window_count"], 10);
    assert_eq!(json["genomes"][0], json!({"name": "A", "length": 8}));
    assert_eq!(json["genomes"][1], json!({"name": "B", "length": 8}));
}

#[tokio::test]
async fn test_security_headers_present() {
    let request = Request::builder()
        .uri("/api/genomes")
        .body(Body::empty())
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(
        headers["referrer-policy"],
        "strict-origin-when-cross-origin"
    );
}

#[tokio::test]
async fn test_search_with_one_substitution() {
    let (status, json) = post_json(
        test_router(),
        "/api/search",
        json!({"fragment": "actt"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["fragment"], "ACTT");
    assert_eq!(json["minimum_length"], 4);
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["genome_name"], "A");
    assert_eq!(matches[1]["genome_name"], "B");
}

#[tokio::test]
async fn test_search_exact_without_match_is_not_found() {
    let (status, json) = post_json(
        test_router(),
        "/api/search",
        json!({"fragment": "ACTT", "exact_match_only": true}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "no_matches");
}

#[tokio::test]
async fn test_search_precondition_is_bad_request() {
    let (status, json) = post_json(
        test_router(),
        "/api/search",
        json!({"fragment": "ACGTACGT", "minimum_length": 2}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_search_rejects_invalid_bases() {
    let (status, json) = post_json(
        test_router(),
        "/api/search",
        json!({"fragment": "ACGT<script>"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_sequence");
    assert_eq!(json["details"], "position 4");
}

#[tokio::test]
async fn test_long_fragment_over_repetitive_genome() {
    let mut index = GenomeIndex::new(4).expect("valid search length");
    index.add_genome(&Genome::new("polyA", "A".repeat(5_000)));
    let router = create_router(Arc::new(AppState { index }));

    let (status, json) = post_json(
        router,
        "/api/search",
        json!({"fragment": "A".repeat(2_000), "exact_match_only": true}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["position"], 0);
    assert_eq!(matches[0]["match_length"], 2_000);
}

#[tokio::test]
async fn test_related_ranking() {
    let (status, json) = post_json(
        test_router(),
        "/api/related",
        json!({"sequence": "ACGTTCGT", "exact_match_only": true}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "query");
    assert_eq!(json["fragment_count"], 2);
    let related = json["related"].as_array().unwrap();
    assert_eq!(related.len(), 2);
    assert_eq!(related[0]["genome_name"], "B");
    assert_eq!(related[0]["percent_match"], 100.0);
    assert_eq!(related[1]["genome_name"], "A");
    assert_eq!(related[1]["percent_match"], 50.0);
}

#[tokio::test]
async fn test_related_threshold_excluding_everything_is_not_found() {
    let (status, json) = post_json(
        test_router(),
        "/api/related",
        json!({
            "name": "q",
            "sequence": "GGGGCCCC",
            "match_percent_threshold": 10.0,
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "no_matches");
}

#[tokio::test]
async fn test_oversized_query_rejected() {
    let sequence = "A".repeat(MAX_QUERY_SEQUENCE_LENGTH + 1);
    let (status, json) = post_json(
        test_router(),
        "/api/related",
        json!({"sequence": sequence}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_sequence");
}

#[tokio::test]
async fn test_body_size_limit_enforced() {
    let sequence = "A".repeat(MAX_REQUEST_BODY_SIZE + 1);
    let (status, _) = post_json(
        test_router(),
        "/api/search",
        json!({"fragment": sequence}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, _) = post_json(
        test_router(),
        "/api/search",
        "{\"fragment\": ".to_string(),
    )
    .await;

    assert!(status.is_client_error());
}
