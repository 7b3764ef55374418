use thiserror::Error;

/// Typed fetch failures; the `Display` text is the exact banner shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Validation(String),
    #[error("Server error (HTTP {0}). Please try again later.")]
    Http(u16),
    #[error("Network error. Please check your internet connection and try again.")]
    Network,
    #[error("The request timed out. Please try again.")]
    Timeout,
    #[error("{0}")]
    Credential(String),
}

/// Map a transport-level failure onto the user-facing categories.
///
/// The legacy client matched substrings of the error text; reqwest exposes
/// the same distinctions as flags, so no string inspection is needed.
pub fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network
    }
}
