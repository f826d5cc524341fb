//! Integration tests for what actually goes over the wire
//!
//! These tests verify the request side against a mock origin:
//! - Host, Authorization and Cookie headers
//! - Query parameters
//! - JSON, form and text bodies with their Content-Type
//! - Redirect handling

mod helpers;

use helpers::{capturing_logger, client_for};
use proxyfetch::{PostOptions, RedirectPolicy, RequestOptions};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_host_token_and_cookies_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("host", "127.0.0.1"))
        .and(header("authorization", "Bearer abc"))
        .and(header("cookie", "session=s1; theme=dark"))
        .and(header("x-client", "tests"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::default()
        .header("X-Client", "tests")
        .token("abc")
        .cookie("session", "s1")
        .cookie("theme", "dark");
    let envelope = client_for(&server).get("/me", options).await.unwrap();

    assert!(envelope.ok(), "mock should have matched every header");
}

#[tokio::test]
async fn test_query_parameters_are_appended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust proxy"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::default()
        .query("q", "rust proxy")
        .query("page", "2");
    let envelope = client_for(&server).get("/search", options).await.unwrap();
    assert!(envelope.ok());
}

#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(header("content-length", "17"))
        .and(body_json(json!({"name": "widget"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = PostOptions::default().json(json!({"name": "widget"}));
    let envelope = client_for(&server).post("/items", options).await.unwrap();
    assert!(envelope.ok());
}

#[tokio::test]
async fn test_post_form_body_beats_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=ada&lang=en"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = PostOptions::default()
        .form([("user", "ada"), ("lang", "en")])
        .text("ignored");
    let envelope = client_for(&server).post("/login", options).await.unwrap();
    assert!(envelope.ok());
}

#[tokio::test]
async fn test_post_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .post("/echo", PostOptions::default().text("hello"))
        .await
        .unwrap();
    assert!(envelope.ok());
}

#[tokio::test]
async fn test_response_cookies_are_collected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "malformed")
                .append_header("set-cookie", "b=2; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .get("/", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(envelope.cookies().len(), 2);
    assert_eq!(envelope.cookie("a"), Some("1"));
    assert_eq!(envelope.cookie("b"), Some("2"));
}

#[tokio::test]
async fn test_response_jar_can_be_sent_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).append_header("set-cookie", "sid=xyz; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("cookie", "sid=xyz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let login = client.get("/login", RequestOptions::default()).await.unwrap();
    let account = client
        .get("/account", RequestOptions::default().cookies(login.cookies().clone()))
        .await
        .unwrap();
    assert!(account.ok());
}

#[tokio::test]
async fn test_redirects_are_returned_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let manual = client.get("/old", RequestOptions::default()).await.unwrap();
    assert_eq!(manual.status(), 302);
    assert!(!manual.ok());
    assert!(manual.error().is_none());
    assert_eq!(manual.header("location"), Some("/new"));

    let followed = client
        .get("/old", RequestOptions::default().redirect(RedirectPolicy::Follow(5)))
        .await
        .unwrap();
    assert!(followed.ok());
    assert_eq!(followed.text(), Some("moved"));
}

#[tokio::test]
async fn test_logger_receives_proxy_and_status_traces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (logger, sink) = capturing_logger();
    client_for(&server)
        .get("/", RequestOptions::default().logger(logger))
        .await
        .unwrap();

    let messages = sink.messages();
    assert_eq!(messages[0], "proxy configuration: direct");
    assert!(messages.iter().any(|m| m == "response status 204"));
}
