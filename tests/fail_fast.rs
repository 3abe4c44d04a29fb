//! Process-level behaviour of the default `exit` policy.

mod common;

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use mockito::Server;

use common::{free_port, SQL_PATH};

const EXPORTER: &str = env!("CARGO_BIN_EXE_druid-tasks-exporter");

fn spawn_exporter(port: u16, druid_uri: &str) -> Child {
    Command::new(EXPORTER)
        .args([
            "--listen-address",
            &format!("127.0.0.1:{port}"),
            "--druid-uri",
            druid_uri,
            "--log-format",
            "json",
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start the exporter binary")
}

async fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    None
}

/// Retries until the exporter accepts connections; the scrape itself is not expected to succeed.
async fn scrape_once_listening(port: u16) {
    let url = format!("http://127.0.0.1:{port}/metrics");
    for _ in 0..100 {
        match reqwest::get(&url).await {
            Err(e) if e.is_connect() => tokio::time::sleep(Duration::from_millis(50)).await,
            _ => return,
        }
    }
    panic!("exporter never started listening on {port}");
}

#[tokio::test]
async fn malformed_druid_answer_terminates_the_process() {
    let mut druid = Server::new_async().await;
    druid
        .mock("POST", SQL_PATH)
        .with_status(200)
        .with_body(r#"{"Type":"index","Status":"RUNNING","Total":3}"#)
        .create_async()
        .await;

    let port = free_port();
    let mut child = spawn_exporter(port, &format!("{}{}", druid.url(), SQL_PATH));
    scrape_once_listening(port).await;

    let status = match wait_for_exit(&mut child, Duration::from_secs(10)).await {
        Some(status) => status,
        None => {
            child.kill().ok();
            panic!("exporter kept running after a failed query");
        }
    };
    assert_eq!(status.code(), Some(1));

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .unwrap()
        .read_to_string(&mut stdout)
        .unwrap();
    assert!(stdout.contains("scrape.query_failed"));
    assert!(stdout.contains(r#""error_kind":"decode""#));
}

#[tokio::test]
async fn unreachable_druid_terminates_the_process() {
    let druid_port = free_port();
    let port = free_port();
    let mut child = spawn_exporter(port, &format!("http://127.0.0.1:{druid_port}{SQL_PATH}"));
    scrape_once_listening(port).await;

    let status = match wait_for_exit(&mut child, Duration::from_secs(10)).await {
        Some(status) => status,
        None => {
            child.kill().ok();
            panic!("exporter kept running with Druid unreachable");
        }
    };
    assert_eq!(status.code(), Some(1));

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .unwrap()
        .read_to_string(&mut stdout)
        .unwrap();
    assert!(stdout.contains("scrape.query_failed"));
    assert!(stdout.contains(r#""error_kind":"transport""#));
}

#[tokio::test]
async fn bind_failure_exits_non_zero() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let mut child = spawn_exporter(port, "http://127.0.0.1:9/druid/v2/sql/");
    let status = match wait_for_exit(&mut child, Duration::from_secs(10)).await {
        Some(status) => status,
        None => {
            child.kill().ok();
            panic!("exporter started on an address already in use");
        }
    };
    assert!(!status.success());
    drop(taken);
}
