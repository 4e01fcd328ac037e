//! Remote image retrieval
//!
//! Synchronous, blocking, no retries. A transport failure or non-2xx
//! status degrades to "no image" with a log line so a broken remote
//! asset never blocks the rest of the document.

use reqwest::blocking::Client;

/// HTTP method for the remote-image directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMethod {
    #[default]
    Get,
    Post,
}

impl FetchMethod {
    /// Parse the directive's method keyword (case-insensitive);
    /// anything unrecognized falls back to GET
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("post") {
            FetchMethod::Post
        } else {
            FetchMethod::Get
        }
    }
}

/// Fetch an image by URL, returning its bytes or `None` on any
/// failure
pub fn fetch_image(url: &str, method: FetchMethod, body: Option<&str>) -> Option<Vec<u8>> {
    let client = match Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(url, error = %err, "image fetch skipped, HTTP client unavailable");
            return None;
        }
    };

    let request = match method {
        FetchMethod::Get => client.get(url),
        FetchMethod::Post => client.post(url).body(body.unwrap_or_default().to_string()),
    };

    match request.send() {
        Ok(response) if response.status().is_success() => match response.bytes() {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(err) => {
                tracing::warn!(url, error = %err, "image fetch body read failed, image omitted");
                None
            }
        },
        Ok(response) => {
            tracing::warn!(url, status = %response.status(), "image fetch rejected, image omitted");
            None
        }
        Err(err) => {
            tracing::warn!(url, error = %err, "image fetch failed, image omitted");
            None
        }
    }
}
