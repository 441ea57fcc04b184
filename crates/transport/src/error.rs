use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// No bearer token configured; raised at construction, before any request.
    #[error("Authorization token is not set")]
    MissingToken,

    /// Transport or API failure. `status` is `0` when the request never
    /// received an HTTP response (DNS, connect, timeout).
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Well-formed response carrying neither data nor errors. The server
    /// contract is data-or-errors, never neither, so this is defensive.
    #[error("Response contained no data")]
    EmptyData,
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Request {
            status: 0,
            message: message.into(),
        }
    }

    /// HTTP status associated with the failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
