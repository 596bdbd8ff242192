//! Form POST against stubbed endpoints.

use super::init_test_env;
use fetch_utils::{post_form, send_request, CookieJar, RequestError, RequestParams, ResponseBody};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_post_form_returns_body_verbatim() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=ada&pass=s3cret+word"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome ada"))
        .expect(1)
        .mount(&server)
        .await;

    let params = RequestParams::post(format!("{}/login", server.uri()))
        .with_form_field("user", "ada")
        .with_form_field("pass", "s3cret word");
    let body = post_form(&params).await.unwrap();

    assert_eq!(body, ResponseBody::Text("welcome ada".to_string()));
}

#[tokio::test]
async fn test_post_form_forces_post_method() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    // method left at its GET default
    let params = RequestParams::new(format!("{}/submit", server.uri()))
        .with_form_field("name", "widget")
        .with_json(true);
    let body = post_form(&params).await.unwrap();

    assert_eq!(body.as_json(), Some(&json!({ "id": 42 })));
}

#[tokio::test]
async fn test_post_form_unreachable_endpoint() {
    init_test_env();
    let params = RequestParams::post("http://127.0.0.1:1/login").with_form_field("user", "ada");
    let err = post_form(&params).await.unwrap_err();

    assert!(matches!(err, RequestError::Transport { .. }));
    assert!(err.is_request_failure());
}

#[tokio::test]
async fn test_post_form_redirect_not_followed_by_default() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/home"))
        .mount(&server)
        .await;

    let params = RequestParams::post(format!("{}/login", server.uri())).with_form_field("user", "ada");
    let err = post_form(&params).await.unwrap_err();

    assert_eq!(err.status(), Some(302));
}

#[tokio::test]
async fn test_post_form_follows_redirects_with_session_cookie() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/home")
                .insert_header("set-cookie", "session=s1; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .and(header_regex("cookie", "session=s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("home"))
        .expect(1)
        .mount(&server)
        .await;

    let jar = CookieJar::new();
    let params = RequestParams::post(format!("{}/login", server.uri()))
        .with_form_field("user", "ada")
        .with_jar(jar.clone())
        .follow_all_redirects(true);
    let body = post_form(&params).await.unwrap();

    assert_eq!(body.as_text(), Some("home"));
    let base = Url::parse(&server.uri()).unwrap();
    assert_eq!(jar.get("session", &base).unwrap().value(), "s1");
}

#[tokio::test]
async fn test_send_request_binary_body() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .mount(&server)
        .await;

    let params = RequestParams::new(format!("{}/logo.png", server.uri())).with_binary(true);
    let body = send_request(&params).await.unwrap();

    assert_eq!(body, ResponseBody::Bytes(vec![0x89, 0x50, 0x4e, 0x47]));
}
