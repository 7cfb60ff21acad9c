//! End-to-end tests of the TMDB rating pipeline against a mock server.

mod common;

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use common::{inception, search_body, TestHarness};
use ratingforge::{Error, ErrorKind, Item, ItemType, Rating};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ---------------------------------------------------------------------------
// Rating outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn happy_path_returns_audience_rating() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "Inception"))
        .and(query_param("year", "2010"))
        .and(query_param("api_key", "K"))
        .and(query_param("language", "en"))
        .and(query_param("region", "US"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(&[(1, "Inception", 8.8)])),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap();

    assert_eq!(rating, Rating::audience("TMDB", 8.8_f64 as f32));
}

#[tokio::test]
async fn no_results_is_empty_rating() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "Nonexistent"))
        .and(query_param("year", "1900"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let item = Item::new("y", "Nonexistent", 1900, ItemType::Movie);
    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &item)
        .await
        .unwrap();

    assert!(rating.is_empty());
}

#[tokio::test]
async fn zero_vote_on_first_result_is_empty_rating() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&[
            (1, "Inception", 0.0),
            (2, "Inception 2", 9.0),
        ])))
        .mount(&h.server)
        .await;

    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap();

    assert!(rating.is_empty());
}

#[tokio::test]
async fn shows_search_tv_endpoint() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .and(query_param("query", "Dark"))
        .and(query_param("first_air_date_year", "2017"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "results": [{"id": 70523, "name": "Dark", "original_name": "Dark", "vote_average": 8.4}]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let item = Item::new("s1", "Dark", 2017, ItemType::Show);
    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &item)
        .await
        .unwrap();

    assert_eq!(rating.rating, 8.4_f64 as f32);
}

#[tokio::test]
async fn special_characters_in_title_round_trip() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "Fast & Furious = Fun"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(&[(9, "Fast & Furious", 6.7)])),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let item = Item::new("f", "Fast & Furious = Fun", 2009, ItemType::Movie);
    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &item)
        .await
        .unwrap();

    assert!(!rating.is_empty());
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_is_not_authorized_error() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    assert!(!err.to_string().contains("api_key=K"));
}

#[tokio::test]
async fn not_found_is_not_found_error() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap_err();

    assert_matches!(err, Error::NotFound(ref p) if p == "/3/search/movie");
}

#[tokio::test]
async fn invalid_json_is_decode_failure() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&h.server)
        .await;

    let err = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
}

#[tokio::test]
async fn other_status_with_payload_body_is_decoded() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(203).set_body_json(search_body(&[(1, "Inception", 7.5)])),
        )
        .mount(&h.server)
        .await;

    let rating = h
        .tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap();

    assert_eq!(rating.rating, 7.5);
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disabled_provider_makes_no_calls() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let mut config = h.config();
    config.tmdb.enabled = false;

    let service = h.factory_with(config).build_tmdb_components().unwrap();
    assert_eq!(service.name, "TMDB");
    assert!(service.platform_service.is_none());
}

#[tokio::test]
async fn enabled_provider_without_key_fails_construction() {
    let h = TestHarness::new().await;
    let mut config = h.config();
    config.tmdb.api_key.clear();

    let err = h.factory_with(config).build_tmdb_components().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancellation_during_request_returns_promptly() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body(&[(1, "Inception", 8.8)]))
                .set_delay(Duration::from_millis(900)),
        )
        .mount(&h.server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = h.tmdb().get_rating(&cancel, &inception()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Canceled);
    assert!(started.elapsed() < Duration::from_millis(800));
}

#[tokio::test]
async fn cancellation_before_call_makes_no_request() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = h.tmdb().get_rating(&cancel, &inception()).await.unwrap_err();
    assert_matches!(err, Error::Canceled);
}

// ---------------------------------------------------------------------------
// Trace log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trace_log_records_path_without_credentials() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(&[(1, "Inception", 8.8)])),
        )
        .mount(&h.server)
        .await;

    h.tmdb()
        .get_rating(&CancellationToken::new(), &inception())
        .await
        .unwrap();

    let lines = h.trace_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["method"], "GET");
    assert_eq!(lines[0]["path"], "/3/search/movie");
    assert_eq!(lines[0]["status"], 200);

    let raw = std::fs::read_to_string(h.log_path()).unwrap();
    assert!(!raw.contains("api_key"));
    assert!(!raw.contains("Inception"));
}
