//! Integration tests for the HTTP translator against a local stub endpoint.
//!
//! Tests cover:
//! - Request shape (query parameters, protected placeholders)
//! - Caching across HTTP calls
//! - Rate-limit responses, timeouts, and refused connections falling back to source text

#![cfg(test)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use lingo_t::i18n::{
    GoogleTranslator, I18n, I18nConfig, Level, MemorySink, TranslationRequest, Vars,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request lines received by the stub, one per connection.
type Seen = Arc<Mutex<Vec<String>>>;

/// What: Start a stub endpoint answering every connection with the same response.
///
/// Inputs:
/// - `status`: Status line tail (e.g., "200 OK")
/// - `body`: Response body
///
/// Output:
/// - Endpoint URL and the shared list of request lines received
///
/// Details:
/// - Responds with `Connection: close`, so each translator call opens a new connection.
async fn spawn_stub(status: &'static str, body: &'static str) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");
    let seen: Seen = Arc::default();
    let seen_by_server = Arc::clone(&seen);
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = Vec::new();
            let mut chunk = [0_u8; 1024];
            while let Ok(n) = socket.read(&mut chunk).await {
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let first_line = String::from_utf8_lossy(&buf)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            if let Ok(mut guard) = seen_by_server.lock() {
                guard.push(first_line);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    (format!("http://{addr}/translate_a/single"), seen)
}

/// What: Online instance whose translator talks to `endpoint` without proxies.
fn http_instance(endpoint: &str, timeout: Duration) -> (I18n, MemorySink) {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("Failed to build test HTTP client");
    let sink = MemorySink::new();
    let i18n = I18n::new(I18nConfig::new("es").with_online(true))
        .expect("Failed to build online instance")
        .with_translator(GoogleTranslator::with_client(endpoint, client))
        .with_sink(Arc::new(sink.clone()));
    (i18n, sink)
}

fn seen_lines(seen: &Seen) -> Vec<String> {
    seen.lock().map(|g| g.clone()).unwrap_or_default()
}

#[tokio::test]
/// What: A successful HTTP translation is parsed, restored, substituted, and cached.
///
/// Inputs:
/// - Stub replying with a one-segment translation carrying the marker.
///
/// Output:
/// - "Hola Ana" twice, one HTTP request whose query carries the marker, not `%user%`.
async fn integration_http_translation_roundtrip() {
    let (endpoint, seen) = spawn_stub(
        "200 OK",
        r#"[[["Hola __PH0__","Hello __PH0__",null,null,10]],null,"en"]"#,
    )
    .await;
    let (mut i18n, sink) = http_instance(&endpoint, Duration::from_secs(5));
    let vars: Vars = [("user".to_string(), "Ana".to_string())].into_iter().collect();
    let request = TranslationRequest::new("Hello %user%", "hello").with_vars(vars);

    assert_eq!(i18n.translate(&request).await, "Hola Ana");
    assert_eq!(i18n.translate(&request).await, "Hola Ana");
    assert_eq!(i18n.store().get("es", "hello"), Some("Hola %user%"));

    let lines = seen_lines(&seen);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("GET /translate_a/single?"));
    assert!(lines[0].contains("client=gtx"));
    assert!(lines[0].contains("sl=auto"));
    assert!(lines[0].contains("tl=es"));
    assert!(lines[0].contains("q=Hello+__PH0__"));
    assert!(sink.messages_at(Level::Error).is_empty());
}

#[tokio::test]
/// What: An HTTP 429 is a translator failure and yields the source text.
async fn integration_http_rate_limit_falls_back() {
    let (endpoint, seen) = spawn_stub("429 Too Many Requests", "slow down").await;
    let (mut i18n, sink) = http_instance(&endpoint, Duration::from_secs(5));
    let request = TranslationRequest::new("Hello", "hello");

    assert_eq!(i18n.translate(&request).await, "Hello");
    assert_eq!(seen_lines(&seen).len(), 1);

    let errors = sink.messages_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("429"));
}

#[tokio::test]
/// What: A body that is not the expected JSON shape is a failure too.
async fn integration_http_bad_body_falls_back() {
    let (endpoint, _seen) = spawn_stub("200 OK", r#"{"unexpected":true}"#).await;
    let (mut i18n, sink) = http_instance(&endpoint, Duration::from_secs(5));

    let out = i18n
        .translate(&TranslationRequest::new("Hello", "hello"))
        .await;
    assert_eq!(out, "Hello");
    assert_eq!(sink.messages_at(Level::Error).len(), 1);
}

#[tokio::test]
/// What: A hung endpoint is cut off by the request timeout.
async fn integration_http_timeout_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    let endpoint = format!("http://{addr}/translate_a/single");
    let (mut i18n, sink) = http_instance(&endpoint, Duration::from_millis(300));

    let out = i18n
        .translate(&TranslationRequest::new("Hello", "hello"))
        .await;
    assert_eq!(out, "Hello");
    assert_eq!(sink.messages_at(Level::Error).len(), 1);
}

#[tokio::test]
/// What: A refused connection is reported and never reaches the caller.
async fn integration_http_connection_refused_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");
    drop(listener);
    let endpoint = format!("http://{addr}/translate_a/single");
    let (mut i18n, sink) = http_instance(&endpoint, Duration::from_secs(2));

    let out = i18n
        .translate(&TranslationRequest::new("Hello", "hello"))
        .await;
    assert_eq!(out, "Hello");
    let errors = sink.messages_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Network error"));
}
