#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use druid_tasks_exporter::config::{resolve, CliArgs, ConfigV1};
use druid_tasks_exporter::routes::create_router;
use druid_tasks_exporter::state::AppState;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const SQL_PATH: &str = "/druid/v2/sql/";

pub fn build_config(druid_uri: &str, on_query_error: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
listen_address: "127.0.0.1:0"
druid_uri: "{druid_uri}"
on_query_error: {on_query_error}
logging:
  level: "warn"
  format: "json"
"#
    );

    resolve(Figment::new().merge(Yaml::string(&yaml)), &CliArgs::default())
        .expect("Failed to parse integration test config")
}

pub fn build_app(config: ConfigV1) -> Router {
    let state = AppState::from_config(Arc::new(config)).expect("task gauge should be valid");
    create_router(state)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Non-comment lines of an exposition body.
pub fn sample_lines(body: &str) -> Vec<&str> {
    body.lines().filter(|l| !l.starts_with('#')).collect()
}

/// A local port nothing listens on.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Answers one request with headers announcing more bytes than it sends,
/// then hangs up. Returns the SQL endpoint URI.
pub async fn serve_cut_short_response() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"Type\":",
            )
            .await
            .unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{address}{SQL_PATH}")
}
