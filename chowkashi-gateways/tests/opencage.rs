use std::time::Duration;

use chowkashi_core::gateways::geocode::GeoCodingGateway;
use chowkashi_gateways::opencage::OpenCage;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn test_client(base_url: &str) -> OpenCage {
    OpenCage::with_base_url("test-key", Duration::from_secs(5), base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn resolve_first_result() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "results": [
            { "geometry": { "lat": 12.9784, "lng": 77.6408 }, "formatted": "Indiranagar, Bengaluru" },
            { "geometry": { "lat": 0.0, "lng": 0.0 } }
        ],
        "status": { "code": 200, "message": "OK" }
    });
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .and(query_param("q", "Indiranagar, Bengaluru"))
        .and(query_param("key", "test-key"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let pos = test_client(&server.uri())
        .resolve_text(" Indiranagar, Bengaluru ")
        .await
        .expect("should resolve");
    let (lat, lng) = pos.to_lat_lng_deg();
    assert!((lat - 12.9784).abs() < 1e-6);
    assert!((lng - 77.6408).abs() < 1e-6);
}

#[tokio::test]
async fn no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;
    assert!(test_client(&server.uri()).resolve_text("Atlantis").await.is_none());
}

#[tokio::test]
async fn failures_resolve_to_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(402).set_body_string("quota exceeded"))
        .mount(&server)
        .await;
    assert!(test_client(&server.uri()).resolve_text("MG Road").await.is_none());
}

#[tokio::test]
async fn empty_text_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    assert!(test_client(&server.uri()).resolve_text("  ").await.is_none());
}
