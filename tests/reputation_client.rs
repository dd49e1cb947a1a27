use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pastegate::{ReputationProvider, ReputationTimeouts, ScanError, VirusTotalClient};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

/// Route table for the stub: (method, path) to (status, JSON body).
type Router = fn(&str, &str) -> (u16, String);

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Minimal single-purpose HTTP responder. Each connection carries one
/// request (the stub answers with `connection: close`), so the client's
/// submit and poll calls each hit a fresh accept.
async fn spawn_stub(route: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];

                let (method, path) = loop {
                    let n = match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);

                    if let Some(header_end) = find_subsequence(&buf, b"\r\n\r\n") {
                        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
                        let content_length = head
                            .to_lowercase()
                            .lines()
                            .find_map(|line| line.strip_prefix("content-length:"))
                            .and_then(|v| v.trim().parse::<usize>().ok())
                            .unwrap_or(0);

                        // Drain the body before responding.
                        let total = header_end + 4 + content_length;
                        while buf.len() < total {
                            let n = match stream.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => n,
                            };
                            buf.extend_from_slice(&chunk[..n]);
                        }

                        let mut parts = head.split_whitespace();
                        let method = parts.next().unwrap_or("").to_string();
                        let path = parts.next().unwrap_or("").to_string();
                        break (method, path);
                    }
                };

                let (status, body) = route(&method, &path);
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    429 => "Too Many Requests",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn fast_timeouts() -> ReputationTimeouts {
    ReputationTimeouts {
        per_request_ms: 2_000,
        poll_interval_ms: 25,
        overall_timeout_ms: 200,
    }
}

#[tokio::test]
async fn domain_404_yields_clean_unknown() {
    init_tracing();
    let base = spawn_stub(|method, path| {
        if method == "GET" && path == "/domains/nowhere.example" {
            (404, "{}".to_string())
        } else {
            (500, "{}".to_string())
        }
    })
    .await;

    let client = VirusTotalClient::new(fast_timeouts()).with_base_url(base);
    let verdict = client
        .check_domain("nowhere.example", "test-key")
        .await
        .unwrap();

    assert!(verdict.clean);
    assert_eq!(verdict.total, 0);
    assert_eq!(verdict.positives, 0);
    assert!(verdict.detections.is_empty());
    assert!(verdict.error.is_none());
}

#[tokio::test]
async fn submit_429_surfaces_rate_limit() {
    init_tracing();
    let base = spawn_stub(|method, path| {
        if method == "POST" && path == "/urls" {
            (429, "{}".to_string())
        } else {
            (500, "{}".to_string())
        }
    })
    .await;

    let client = VirusTotalClient::new(fast_timeouts()).with_base_url(base);
    let err = client
        .check_url("http://example.com/x", "test-key")
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::RateLimit(_)));
}

#[tokio::test]
async fn stalled_analysis_fails_open_at_deadline() {
    init_tracing();
    let base = spawn_stub(|method, path| {
        if method == "POST" && path == "/urls" {
            (200, json!({"data": {"id": "an-stalled"}}).to_string())
        } else if method == "GET" && path == "/analyses/an-stalled" {
            // Never completes.
            (
                200,
                json!({"data": {"attributes": {"status": "queued"}}}).to_string(),
            )
        } else {
            (500, "{}".to_string())
        }
    })
    .await;

    let client = VirusTotalClient::new(fast_timeouts()).with_base_url(base);
    let verdict = client
        .check_url("http://slow.example/x", "test-key")
        .await
        .unwrap();

    assert!(verdict.clean);
    assert!(!verdict.malicious);
    assert!(!verdict.suspicious);
    assert!(verdict.detections.is_empty());
    assert!(verdict
        .error
        .as_deref()
        .unwrap()
        .contains("not completed within 200ms"));
}

#[tokio::test]
async fn completed_analysis_derives_verdict_over_the_wire() {
    init_tracing();
    let base = spawn_stub(|method, path| {
        if method == "POST" && path == "/urls" {
            (200, json!({"data": {"id": "an-done"}}).to_string())
        } else if method == "GET" && path == "/analyses/an-done" {
            (
                200,
                json!({"data": {"attributes": {
                    "status": "completed",
                    "date": 1_700_000_000,
                    "stats": {"harmless": 60, "malicious": 2, "suspicious": 0, "undetected": 8},
                    "results": {
                        "EngineA": {"engine_name": "EngineA", "category": "malicious"},
                        "EngineB": {"engine_name": "EngineB", "category": "harmless"},
                    },
                }}})
                .to_string(),
            )
        } else {
            (500, "{}".to_string())
        }
    })
    .await;

    let client = VirusTotalClient::new(fast_timeouts()).with_base_url(base);
    let verdict = client
        .check_url("http://evil.example/payload", "test-key")
        .await
        .unwrap();

    assert!(verdict.malicious);
    assert!(!verdict.clean);
    assert_eq!(verdict.positives, 2);
    assert_eq!(verdict.total, 70);
    assert_eq!(verdict.detections, vec!["EngineA"]);
    assert!(verdict.scan_date.is_some());
    assert!(verdict.error.is_none());
}

#[tokio::test]
async fn flagged_domain_lookup_over_the_wire() {
    init_tracing();
    let base = spawn_stub(|method, path| {
        if method == "GET" && path == "/domains/flagged.example" {
            (
                200,
                json!({"data": {"attributes": {
                    "last_analysis_date": 1_700_000_000,
                    "last_analysis_stats": {"harmless": 62, "malicious": 0, "suspicious": 2},
                    "last_analysis_results": {
                        "EngineC": {"engine_name": "EngineC", "category": "suspicious"},
                    },
                }}})
                .to_string(),
            )
        } else {
            (500, "{}".to_string())
        }
    })
    .await;

    let client = VirusTotalClient::new(fast_timeouts()).with_base_url(base);
    let verdict = client
        .check_domain("flagged.example", "test-key")
        .await
        .unwrap();

    assert!(verdict.suspicious);
    assert!(!verdict.malicious);
    assert!(!verdict.clean);
    assert_eq!(verdict.positives, 2);
    assert_eq!(verdict.total, 64);
    assert_eq!(verdict.detections, vec!["EngineC"]);
}
