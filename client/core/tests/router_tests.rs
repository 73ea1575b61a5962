//! Router transport tests
//!
//! These tests run the real HTTP backend against a minimal stub router on a
//! local port and check the wire contract end to end:
//! - Request method, path, headers and body
//! - Error statuses surfaced verbatim
//! - Undecodable success bodies classified as protocol errors
//! - Connection failures

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use agent_chat_core::{
    AgentBackend, AudioClip, BackendConfig, ClientConfig, Coordinator, ErrorKind,
    InboundResult, OutboundPayload, RouterBackend, SessionKey, TransportError, TurnRole,
};

// =============================================================================
// Stub router
// =============================================================================

#[derive(Clone, Debug)]
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Serve every connection with the same canned response
async fn spawn_stub(status: u16, body: &'static str) -> (String, Captured) {
    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    spawn_raw_stub(response).await
}

/// Stub router that answers every request with `response` as-is
async fn spawn_raw_stub(response: String) -> (String, Captured) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::default();
    let log = Arc::clone(&captured);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut stream).await;
            log.lock().unwrap().push(request);

            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}/agent"), captured)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            let (k, v) = line.split_once(':')?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string(),
    }
}

fn backend_for(url: &str) -> RouterBackend {
    RouterBackend::new(BackendConfig::new(url, "rk-test-key")).unwrap()
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_request_contract() {
    let (url, captured) = spawn_stub(200, r#"{"content":"hi","iterations":3}"#).await;
    let backend = backend_for(&url);

    let key = SessionKey::from("web-demo-12");
    let result = backend
        .send(&OutboundPayload::new("hello", &key))
        .await
        .unwrap();
    assert_eq!(result, InboundResult::new("hi", 3));

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.request_line.starts_with("POST /agent "));
    assert_eq!(request.header("authorization"), Some("Bearer rk-test-key"));
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "message": "hello", "session_key": "web-demo-12" })
    );
}

#[tokio::test]
async fn test_error_status_carries_body_verbatim() {
    let (url, _captured) = spawn_stub(500, "boom").await;
    let backend = backend_for(&url);

    let err = backend
        .send(&OutboundPayload::new("x", &SessionKey::from("k")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 500,
            body: "boom".to_string()
        }
    );
    assert_eq!(err.to_string(), "Router Error 500: boom");
}

#[tokio::test]
async fn test_truncated_error_body_still_reports_status() {
    // Promises 64 bytes, sends 4, then closes
    let (url, _captured) = spawn_raw_stub(
        "HTTP/1.1 502 Stub\r\nContent-Length: 64\r\nConnection: close\r\n\r\nboom".to_string(),
    )
    .await;
    let backend = backend_for(&url);

    let err = backend
        .send(&OutboundPayload::new("x", &SessionKey::from("k")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 502,
            body: String::new()
        }
    );
    assert_eq!(err.to_string(), "Router Error 502: ");
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let (url, _captured) = spawn_stub(200, "<html>oops</html>").await;
    let backend = backend_for(&url);

    let err = backend
        .send(&OutboundPayload::new("x", &SessionKey::from("k")))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_partial_json_is_passed_through() {
    let (url, _captured) = spawn_stub(200, r#"{"content":"only content"}"#).await;
    let backend = backend_for(&url);

    let result = backend
        .send(&OutboundPayload::new("x", &SessionKey::from("k")))
        .await
        .unwrap();
    assert_eq!(result.content.as_deref(), Some("only content"));
    assert_eq!(result.iterations, None);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(&format!("http://{addr}/agent"));
    let err = backend
        .send(&OutboundPayload::new("x", &SessionKey::from("k")))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

// =============================================================================
// Coordinator over HTTP
// =============================================================================

#[tokio::test]
async fn test_coordinator_absorbs_router_failure() {
    let (url, captured) = spawn_stub(500, "boom").await;
    let (tx, _rx) = mpsc::channel(100);
    let config = ClientConfig {
        greeting: None,
        ..Default::default()
    };
    let mut coordinator = Coordinator::new(backend_for(&url), config, tx);

    let outcome = coordinator.submit_text("x").await.unwrap();
    assert_eq!(outcome.error().map(|e| e.kind()), Some(ErrorKind::Transport));

    let history = coordinator.export_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, TurnRole::Assistant);
    assert_eq!(history[1].content, "Error: Router Error 500: boom");
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_coordinator_audio_over_http() {
    let (url, captured) = spawn_stub(200, r#"{"content":"heard","iterations":2}"#).await;
    let (tx, _rx) = mpsc::channel(100);
    let mut coordinator = Coordinator::with_session_key(
        backend_for(&url),
        ClientConfig::default(),
        SessionKey::from("web-demo-5"),
        tx,
    );

    let clip = AudioClip::wav(b"ABC".to_vec());
    let outcome = coordinator.handle_audio(&clip, "QUJD").await;
    assert!(outcome.is_replied());

    let requests = captured.lock().unwrap().clone();
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["message"], "data:audio/wav;base64,QUJD");
    assert_eq!(body["session_key"], "web-demo-5");
}
