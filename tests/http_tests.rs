//! End-to-end tests against a real listener.
//!
//! Each test binds its own server on an ephemeral loopback port and drives it
//! with reqwest, so tests run in parallel without sharing state.
//!
//! Run with: cargo test --test http_tests
use std::net::SocketAddr;

use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use geo_echo::create_router;
use geo_echo::http::serve;

/// A running server plus the handle that stops it
struct TestServer {
    addr: SocketAddr,
    client: Client,
    stop: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            serve(listener, create_router(), async {
                let _ = stopped.await;
            })
            .await
            .expect("Server error");
        });

        Self {
            addr,
            client: Client::new(),
            stop: Some(stop),
            task: Some(task),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn request(&self, method: Method, path: &str, body: &str) -> (StatusCode, String, String) {
        let response = self
            .client
            .request(method, self.url(path))
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed");

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await.expect("Failed to read body");
        (status, content_type, body)
    }

    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.expect("Server task panicked");
        }
    }
}

#[tokio::test]
async fn test_get_healthz() {
    let server = TestServer::start().await;

    let (status, content_type, body) = server.request(Method::GET, "/healthz", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"alive":true}"#);

    server.shutdown().await;
}

#[tokio::test]
async fn test_healthz_any_method_any_body() {
    let server = TestServer::start().await;

    for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
        let (status, _, body) = server.request(method, "/healthz", "{not json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"alive":true}"#);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_post_api_capitalized_keys() {
    let server = TestServer::start().await;

    let (status, content_type, body) = server
        .request(Method::POST, "/api", r#"{"Lat":35.14326,"Lon":-116.104}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"lat":35.14326,"lon":-116.104}"#);

    server.shutdown().await;
}

#[tokio::test]
async fn test_post_api_string_coordinate() {
    let server = TestServer::start().await;

    let (status, content_type, body) = server
        .request(Method::POST, "/api", r#"{"lat":35.14326,"lon":"-116.104"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"message":"bad json"}"#);

    server.shutdown().await;
}

#[tokio::test]
async fn test_post_api_empty_body() {
    let server = TestServer::start().await;

    let (status, _, body) = server.request(Method::POST, "/api", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"message":"bad json"}"#);

    server.shutdown().await;
}

#[tokio::test]
async fn test_api_is_method_agnostic_and_idempotent() {
    let server = TestServer::start().await;
    let payload = r#"{"lat":-33.86785,"lon":151.2073}"#;

    let mut bodies = Vec::new();
    for method in [Method::POST, Method::PUT, Method::POST] {
        let (status, _, body) = server.request(method, "/api", payload).await;
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }
    assert_eq!(bodies[0], r#"{"lat":-33.86785,"lon":151.2073}"#);
    assert!(bodies.iter().all(|b| b == &bodies[0]));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start().await;

    let (status, _, _) = server.request(Method::GET, "/api/extra", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test]
async fn test_post_api_whole_and_zero_coordinates() {
    let server = TestServer::start().await;

    let (status, _, body) = server
        .request(Method::POST, "/api", r#"{"lat":0,"lon":-200}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"lat":0,"lon":-200}"#);

    let (status, _, body) = server.request(Method::POST, "/api", "null").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"lat":0,"lon":0}"#);

    server.shutdown().await;
}
