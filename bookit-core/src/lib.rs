pub mod clock;
pub mod fetch;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use fetch::{FetchError, FetchState, FetchTicket, Loadable, Request};
pub use repository::{BookingRepository, ExperienceRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Remote API unreachable: {0}")]
    Unreachable(String),
    #[error("Remote API returned status {status}")]
    RemoteError {
        status: u16,
        /// `message` field of the API's JSON error body, when it sent one.
        message: Option<String>,
    },
    #[error("Remote API response could not be decoded: {0}")]
    DecodeError(String),
    #[error("Request cancelled")]
    Cancelled,
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl CoreError {
    /// Message the remote API attached to a failure, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            CoreError::RemoteError { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<FetchError> for CoreError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Cancelled => CoreError::Cancelled,
            FetchError::Panicked(msg) => CoreError::InternalError(msg),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_only_for_remote_errors() {
        let err = CoreError::RemoteError {
            status: 422,
            message: Some("Slot already taken".to_string()),
        };
        assert_eq!(err.remote_message(), Some("Slot already taken"));
        assert_eq!(CoreError::Cancelled.remote_message(), None);
    }
}
