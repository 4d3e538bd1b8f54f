use crate::domain::speech::{ProviderKind, TtsProviderError};
use serde::Serialize;
use std::time::Duration;

/// Request body of the OpenAI-compatible `audio/speech` endpoint, also served by Groq
#[derive(Debug, Serialize)]
pub struct SpeechRequestBody<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub voice: &'a str,
    pub response_format: &'static str,
}

/// HTTP client shared by one provider adapter, with the per-call timeout applied
pub fn build_http_client(provider: ProviderKind, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                provider = %provider,
                error = %e,
                "Failed to build HTTP client with timeout, using defaults"
            );
            reqwest::Client::new()
        })
}

pub fn network_error(provider: ProviderKind, err: reqwest::Error) -> TtsProviderError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    TtsProviderError::NetworkError { provider, message }
}

/// Map a non-2xx vendor response to a provider error.
///
/// HTTP 429 or any of the vendor's `quota_markers` in the body means quota or rate-limit
/// exhaustion.
pub fn classify_failure(
    provider: ProviderKind,
    status: reqwest::StatusCode,
    body: String,
    quota_markers: &[&str],
) -> TtsProviderError {
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body
    };

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || quota_markers.iter().any(|marker| message.contains(marker))
    {
        TtsProviderError::QuotaExceeded { provider, message }
    } else {
        TtsProviderError::ProviderError {
            provider,
            status: status.as_u16(),
            message,
        }
    }
}

/// Body of a failed response, empty when it cannot be read
pub async fn failure_body(provider: ProviderKind, response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(
                provider = %provider,
                error = %e,
                "Failed to read error response body"
            );
            String::new()
        }
    }
}

/// Read an audio body, or classify the failure
pub async fn read_audio(
    provider: ProviderKind,
    response: reqwest::Response,
    quota_markers: &[&str],
) -> Result<Vec<u8>, TtsProviderError> {
    let status = response.status();

    if !status.is_success() {
        let body = failure_body(provider, response).await;
        return Err(classify_failure(provider, status, body, quota_markers));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| network_error(provider, e))?;
    Ok(bytes.to_vec())
}

/// Log-friendly prefix of a chunk
pub fn preview(text: &str) -> &str {
    match text.char_indices().nth(80) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
