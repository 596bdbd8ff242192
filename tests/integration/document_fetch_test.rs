//! HTML fetch with cookie-jar propagation.

use super::init_test_env;
use fetch_utils::{get_document, CookieJar, RequestError};
use url::Url;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Account</title></head>
  <body>
    <h1 class="greeting">Hello, Ada</h1>
    <a class="nav" href="/orders">Orders</a>
    <a class="nav" href="/logout">Log out</a>
  </body>
</html>"#;

fn html_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_get_document_parses_html() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(html_page())
        .mount(&server)
        .await;

    let response = get_document(&format!("{}/account", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.document.title(), Some("Account".to_string()));
    assert_eq!(
        response.document.select_text("h1.greeting").unwrap(),
        vec!["Hello, Ada".to_string()]
    );
    assert_eq!(
        response.document.select_attr("a.nav", "href").unwrap(),
        vec!["/orders".to_string(), "/logout".to_string()]
    );
    assert!(response.cookie_jar.is_empty());
}

#[tokio::test]
async fn test_get_document_creates_jar_with_response_cookies() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(html_page().insert_header("set-cookie", "session=xyz; Path=/; HttpOnly"))
        .mount(&server)
        .await;

    let response = get_document(&format!("{}/login", server.uri()), None)
        .await
        .unwrap();

    let base = Url::parse(&server.uri()).unwrap();
    let session = response.cookie_jar.get("session", &base).unwrap();
    assert_eq!(session.value(), "xyz");
    assert_eq!(response.cookie_jar.all_cookies().len(), 1);
}

#[tokio::test]
async fn test_get_document_reuses_jar_across_calls() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header_regex("cookie", "session=abc"))
        .respond_with(html_page().insert_header("set-cookie", "visited=1"))
        .expect(2)
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let jar = CookieJar::new();
    jar.set_cookie("session=abc", &base).unwrap();

    let url = format!("{}/page", server.uri());
    let first = get_document(&url, Some(jar.clone())).await.unwrap();
    assert!(first.cookie_jar.ptr_eq(&jar));

    let second = get_document(&url, Some(first.cookie_jar)).await.unwrap();
    assert!(second.cookie_jar.ptr_eq(&jar));

    assert_eq!(jar.get("session", &base).unwrap().value(), "abc");
    assert_eq!(jar.get("visited", &base).unwrap().value(), "1");
    assert_eq!(
        jar.cookie_string(&base),
        Some("session=abc; visited=1".to_string())
    );
}

#[tokio::test]
async fn test_get_document_missing_page_is_status_failure() {
    init_test_env();
    let server = MockServer::start().await;

    let err = get_document(&format!("{}/nowhere", server.uri()), None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_get_document_unreachable_is_transport_failure() {
    init_test_env();
    let err = get_document("http://127.0.0.1:1/", Some(CookieJar::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Transport { .. }));
}
