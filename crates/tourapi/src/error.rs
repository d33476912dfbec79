/// Errors from the tourism API layer.
#[derive(Debug, thiserror::Error)]
pub enum TourApiError {
    /// No service key is configured, so no request can be made.
    #[error("Tourism API service key is not configured")]
    MissingServiceKey,

    /// The HTTP request itself failed (network, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Tourism API HTTP error ({status}): {body}")]
    Http {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API answered 2xx but its embedded result code is not success.
    #[error("Tourism API error {code}: {message}")]
    Upstream { code: String, message: String },

    /// The body did not have the expected shape.
    #[error("Unexpected tourism API response: {0}")]
    Decode(String),

    /// The request was rejected before anything was sent.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl TourApiError {
    /// Whether repeating the same request could succeed.
    ///
    /// Configuration and validation failures are permanent; everything that
    /// involved the network is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MissingServiceKey | Self::Validation(_))
    }
}
