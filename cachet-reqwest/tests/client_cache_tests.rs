//! Integration tests for the full pipeline over a real HTTP server.

use std::time::Duration;

use cachet::{Client, Config, Request, TransportError};
use cachet_moka::MemoryBackend;
use cachet_reqwest::ReqwestTransport;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(config: Config) -> Client {
    Client::builder(
        ReqwestTransport::new(),
        MemoryBackend::builder().max_entries(100).build(),
    )
    .config(config)
    .build()
}

/// Cache MISS then HIT - the upstream sees exactly one request.
#[tokio::test]
async fn test_cache_miss_then_hit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Hello from server"
        })))
        .expect(1) // Should only be called once due to caching
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().default_ttl_seconds(60).build());
    let url = format!("{}/data", mock_server.uri());

    let response1 = client.get(&url).await.unwrap();
    assert_eq!(response1.status(), 200);
    let body1: serde_json::Value = serde_json::from_slice(response1.body()).unwrap();
    assert_eq!(body1["message"], "Hello from server");

    let response2 = client.get(&url).await.unwrap();
    assert_eq!(response2.status(), 200);
    let body2: serde_json::Value = serde_json::from_slice(response2.body()).unwrap();
    assert_eq!(body2["message"], "Hello from server");
}

/// Response integrity - body, headers, status preserved across the cache.
#[tokio::test]
async fn test_response_integrity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("response body content")
                .insert_header("X-Custom-Header", "custom-value")
                .insert_header("X-Another-Header", "another-value"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().default_ttl_seconds(60).build());
    let url = format!("{}/headers", mock_server.uri());

    let live = client.get(&url).await.unwrap();
    assert_eq!(live.status(), 200);

    let cached = client.get(&url).await.unwrap();
    assert_eq!(cached.status(), 200);
    assert_eq!(cached.headers().get("X-Custom-Header").unwrap(), "custom-value");
    assert_eq!(
        cached.headers().get("X-Another-Header").unwrap(),
        "another-value"
    );
    assert_eq!(cached.body().as_ref(), b"response body content");
}

/// POST bodies produce distinct cache entries.
#[tokio::test]
async fn test_post_bodies_are_cached_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string(r#"{"query":"{a}"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("result a"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string(r#"{"query":"{b}"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("result b"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().default_ttl_seconds(60).build());
    let url = format!("{}/graphql", mock_server.uri());

    let a1 = client.post(&url, r#"{"query":"{a}"}"#).await.unwrap();
    let a2 = client.post(&url, r#"{"query":"{a}"}"#).await.unwrap(); // hit
    let b = client.post(&url, r#"{"query":"{b}"}"#).await.unwrap();

    assert_eq!(a1.body().as_ref(), b"result a");
    assert_eq!(a2.body().as_ref(), b"result a");
    assert_eq!(b.body().as_ref(), b"result b");
}

/// A bypass policy forces live calls even with a valid entry.
#[tokio::test]
async fn test_bypass_policy_forces_live_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("live"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = Client::builder(
        ReqwestTransport::new(),
        MemoryBackend::builder().max_entries(100).build(),
    )
    .config(Config::builder().default_ttl_seconds(60).build())
    .bypass_policy(|_: &Request| true)
    .build();

    let url = format!("{}/data", mock_server.uri());
    client.get(&url).await.unwrap();
    client.get(&url).await.unwrap();
}

/// A negative TTL disables caching entirely.
#[tokio::test]
async fn test_disabled_ttl_always_calls_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().disable_caching().build());
    let url = format!("{}/data", mock_server.uri());

    client.get(&url).await.unwrap();
    client.get(&url).await.unwrap();
}

/// Non-2xx responses are returned to the caller but never cached.
#[tokio::test]
async fn test_error_statuses_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().default_ttl_seconds(60).build());
    let url = format!("{}/flaky", mock_server.uri());

    let first = client.get(&url).await.unwrap();
    assert_eq!(first.status(), 500);
    let second = client.get(&url).await.unwrap();
    assert_eq!(second.status(), 500);
}

/// A slow upstream trips the per-request timeout as a TransportError.
#[tokio::test]
async fn test_timeout_surfaces_as_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = client(Config::builder().timeout(Duration::from_millis(100)).build());
    let url = format!("{}/slow", mock_server.uri());

    let result = client.get(&url).await;
    assert!(matches!(result, Err(TransportError::Timeout)));
}
