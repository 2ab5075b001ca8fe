//! fetch_json against a local stand-in for api.github.com.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use interfaces_github_rest::{FetchError, GitHubClient};
use reqwest::Url;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use utils_rate_limit::RateLimiter;

async fn echo_headers(headers: HeaderMap) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    Json(json!({
        "authorization": header("authorization"),
        "accept": header("accept"),
        "user_agent": header("user-agent"),
    }))
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/headers", get(echo_headers))
        .route("/array", get(|| async { Json(json!([{"a": 1}, {"a": 2}])) }))
        .route(
            "/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "Not Found"})),
                )
            }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        )
        .route(
            "/silent",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route("/not-json", get(|| async { "<html>nope</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!([]))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> GitHubClient {
    GitHubClient::new("test-token", Url::parse(&format!("http://{addr}")).unwrap()).unwrap()
}

fn url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{addr}{path}")).unwrap()
}

#[tokio::test]
async fn sends_token_accept_and_user_agent() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let body = client.fetch_json(url(addr, "/headers")).await.unwrap();

    assert_eq!(body["authorization"], "token test-token");
    assert_eq!(body["accept"], "application/vnd.github.v3+json");
    assert_ne!(body["user_agent"], "");
}

#[tokio::test]
async fn returns_body_unmodified() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let body = client.fetch_json(url(addr, "/array")).await.unwrap();

    assert_eq!(body, json!([{"a": 1}, {"a": 2}]));
}

#[tokio::test]
async fn client_error_status_carries_github_message() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let err = client.fetch_json(url(addr, "/missing")).await.unwrap_err();

    match &err {
        FetchError::UpstreamStatus {
            status, message, ..
        } => {
            assert_eq!(*status, reqwest::StatusCode::NOT_FOUND);
            assert_eq!(message, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn server_error_status_carries_raw_body() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let err = client.fetch_json(url(addr, "/broken")).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::UpstreamStatus { ref message, .. } if message == "upstream exploded"
    ));
}

#[tokio::test]
async fn empty_error_body_reports_reason_phrase() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let err = client.fetch_json(url(addr, "/silent")).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::UpstreamStatus { ref message, .. } if message == "Service Unavailable"
    ));
}

#[tokio::test]
async fn truncated_error_body_reports_reason_phrase() {
    // Promises 100 bytes of body, sends 7, then hangs up.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = client_for(addr);
    let err = client.fetch_json(url(addr, "/array")).await.unwrap_err();

    match err {
        FetchError::UpstreamStatus {
            status, message, ..
        } => {
            assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_read_error() {
    let addr = spawn_upstream().await;
    let client = client_for(addr);

    let err = client.fetch_json(url(addr, "/not-json")).await.unwrap_err();

    assert!(matches!(err, FetchError::ResponseRead { .. }));
}

#[tokio::test]
async fn refused_connection_is_send_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.fetch_json(url(addr, "/array")).await.unwrap_err();

    assert!(matches!(err, FetchError::RequestSend { .. }));
}

#[tokio::test]
async fn slow_upstream_hits_timeout() {
    let addr = spawn_upstream().await;
    let limiter = Arc::new(RateLimiter::new(60, Duration::from_secs(60)).unwrap());
    let client = GitHubClient::with_options(
        "test-token",
        Url::parse(&format!("http://{addr}")).unwrap(),
        Duration::from_millis(200),
        limiter,
    )
    .unwrap();

    let err = client.fetch_json(url(addr, "/slow")).await.unwrap_err();

    match err {
        FetchError::RequestSend { source } => assert!(source.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}
