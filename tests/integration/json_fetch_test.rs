//! JSON fetch against stubbed endpoints.

use super::init_test_env;
use fetch_utils::{get_json, ExecutionConfig, Executor, RequestError, RequestParams};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user() -> serde_json::Value {
    json!({
        "_id": "123ABC",
        "_rev": "946B7D1C",
        "username": "pgte",
        "email": "pedro.teixeira@gmail.com"
    })
}

#[tokio::test]
async fn test_get_json_returns_stubbed_body() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user()))
        .expect(1)
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/users/1", server.uri())).with_json(true);
    let result = get_json(&params).await.unwrap();

    assert!(result.is_object());
    assert_eq!(result, user());
}

#[tokio::test]
async fn test_get_json_server_error_is_status_failure() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/500", server.uri()));
    let err = get_json(&params).await.unwrap_err();

    assert!(err.is_request_failure());
    assert_eq!(err.status(), Some(500));
    match err {
        RequestError::Status { body, .. } => assert_eq!(body, "boom"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_json_non_json_body_is_decode_error() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/html", server.uri()));
    let err = get_json(&params).await.unwrap_err();

    assert!(matches!(err, RequestError::Decode { .. }));
    assert!(!err.is_request_failure());
}

#[tokio::test]
async fn test_get_json_empty_body_is_null() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/empty", server.uri()));
    assert_eq!(get_json(&params).await.unwrap(), serde_json::Value::Null);
}

#[tokio::test]
async fn test_get_json_sends_query_and_headers() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("page", "2"))
        .and(header("accept", "application/json"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/search", server.uri()))
        .with_query("q", "rust")
        .with_query("page", "2")
        .with_header("X-Api-Key", "secret");
    let result = get_json(&params).await.unwrap();

    assert_eq!(result["hits"], 3);
}

#[tokio::test]
async fn test_executor_default_headers_and_overrides() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .and(header("x-client", "tests"))
        .and(header("accept-language", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let executor = Executor::new(
        ExecutionConfig::new(Duration::from_secs(5))
            .with_default_header("X-Client", "tests")
            .with_default_header("Accept-Language", "en"),
    );
    let params = RequestParams::new(format!("{}/headers", server.uri()))
        .with_header("accept-language", "de");

    assert_eq!(executor.get_json(&params).await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_get_json_sends_a_single_accept_header() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let executor = Executor::new(
        ExecutionConfig::new(Duration::from_secs(5)).with_default_header("Accept", "text/html"),
    );
    let url = format!("{}/accept", server.uri());
    executor.get_json(&RequestParams::new(&url)).await.unwrap();
    executor
        .get_json(&RequestParams::new(&url).with_header("ACCEPT", "application/hal+json"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let accept = |i: usize| -> Vec<String> {
        requests[i]
            .headers
            .get_all("accept")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(accept(0), vec!["application/json"]);
    assert_eq!(accept(1), vec!["application/hal+json"]);
}

#[tokio::test]
async fn test_get_json_timeout() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let executor = Executor::new(ExecutionConfig::new(Duration::from_millis(50)));
    let params = RequestParams::new(format!("{}/slow", server.uri()));
    let err = executor.get_json(&params).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(err.is_request_failure());
}
