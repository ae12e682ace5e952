/// Errors from the Earth Engine compute layer.
#[derive(Debug, thiserror::Error)]
pub enum EarthEngineError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Earth Engine API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the payload did not have the
    /// expected shape for the submitted expression.
    #[error("Malformed compute response: {0}")]
    Malformed(String),
}
