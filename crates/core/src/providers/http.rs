use reqwest::{Client, Response};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Build the shared HTTP client. The timeout is not available on WASM.
pub fn build_client(timeout_secs: u64) -> Client {
    let builder = Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.timeout(Duration::from_secs(timeout_secs));
    #[cfg(target_arch = "wasm32")]
    let _ = timeout_secs;
    builder.build().unwrap_or_else(|_| Client::new())
}

/// Error bodies from the auth and REST endpoints use different field names.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Pick the most descriptive message out of an error body.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {trimmed}")
            }
        })
}

/// Consume a failed response and turn it into a message.
pub async fn error_message(resp: Response) -> String {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    error_message_from_body(status, &body)
}
