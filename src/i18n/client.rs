//! Translation client boundary and the default HTTP implementation.

use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::Value;

/// Result type for translator calls.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: External collaborator turning text into another language.
///
/// Details:
/// - `source` may be "auto" to let the implementation detect the input language.
/// - Any `Err` is treated by the resolver as "keep the original text".
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` into `target`.
    fn translate<'a>(
        &'a self,
        text: &'a str,
        source: &'a str,
        target: &'a str,
    ) -> BoxFuture<'a, Result<String>>;
}

/// Translator backed by the public Google Translate web endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// What: Build a translator with its own HTTP client.
    ///
    /// Inputs:
    /// - `endpoint`: Base URL of the `translate_a/single` endpoint
    /// - `timeout`: Per-request timeout
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be created
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// What: Build a translator around an existing HTTP client.
    ///
    /// Details:
    /// - Lets callers share one connection pool or customise proxies and TLS;
    ///   the client's own timeout applies.
    #[must_use]
    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Endpoint this translator talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one translation request and parse the reply.
    async fn request(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| format!("Invalid translation endpoint '{}': {e}", self.endpoint))?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))?;
        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            target_language = target,
            "translation response received"
        );
        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            return Err(format!("Translation endpoint returned HTTP {status}: {preview}").into());
        }
        parse_translation_response(&body)
    }
}

impl Translator for GoogleTranslator {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        source: &'a str,
        target: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.request(text, source, target))
    }
}

/// What: Extract translated text from a `translate_a/single` JSON body.
///
/// Inputs:
/// - `body`: Raw response body
///
/// Output:
/// - Concatenated translated segments
///
/// # Errors
/// - Returns `Err` when the body is not JSON, has an unexpected shape, or holds no text
///
/// Details:
/// - The body is `[[["<translated>", "<original>", ...], ...], ...]`; long inputs come
///   back split into several segments that must be joined in order.
pub fn parse_translation_response(body: &str) -> Result<String> {
    let v: Value = serde_json::from_str(body)?;
    let segments = v
        .get(0)
        .and_then(Value::as_array)
        .ok_or("Unexpected translation response shape")?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if translated.is_empty() {
        return Err("Translation response contained no text".into());
    }
    Ok(translated)
}
