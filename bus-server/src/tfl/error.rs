//! TfL client error types.

/// Errors from the TfL Unified API client.
///
/// HTTP callers see every variant as the same internal error; the variants
/// only feed the server-side log.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (connect, TLS, reading the body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned something other than 200 OK
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response was JSON but not in the expected shape
    #[error("unexpected response shape: {message}")]
    Shape { message: String },

    /// Configured base URL cannot be used to build endpoints
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}
