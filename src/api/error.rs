use thiserror::Error;

/// Any failure while fetching from a remote endpoint.
///
/// The poller treats every variant the same way: log it and keep the
/// previous state. The variants only exist so the log line says what broke.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, TLS error and so on
    #[error("Request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status
    #[error("HTTP Error ({status}): {body}")]
    Status { status: u16, body: String },
    /// The body was not the shape we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// A credential could not be turned into a header value
    #[error("Invalid header: {0}")]
    Header(String),
    /// The selected backend has no endpoint for this data
    #[error("Not supported by this backend: {0}")]
    Unsupported(&'static str),
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            FetchError::Status { status: 401, .. } | FetchError::Status { status: 403, .. }
        )
    }
}
