//! Loading state shared by every screen.

use std::fmt::Display;

/// Phase of a piece of screen data.
///
/// Every phase can be re-entered: a retry always goes back to `Loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState<T> {
    /// Request in flight.
    #[default]
    Loading,
    /// Data arrived.
    Success(T),
    /// Request failed with a message for the user.
    Error(String),
    /// Request succeeded with nothing to show.
    Empty,
}

impl<T> UiState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether data is available.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the last request failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Whether the last request returned nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The data, if available.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if the last request failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Success or error from a single-value result.
    pub fn from_result<E: Display>(result: Result<T, E>, fallback: &str) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Error(message_or(&e, fallback)),
        }
    }
}

impl<T> UiState<Vec<T>> {
    /// Success, empty or error from a list result.
    pub fn from_list<E: Display>(result: Result<Vec<T>, E>, fallback: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Success(items),
            Err(e) => Self::Error(message_or(&e, fallback)),
        }
    }
}

fn message_or(error: &impl Display, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list() {
        let ok: UiState<Vec<u8>> = UiState::from_list(Ok::<_, String>(vec![1]), "failed");
        assert_eq!(ok.data(), Some(&vec![1]));

        let empty: UiState<Vec<u8>> = UiState::from_list(Ok::<_, String>(vec![]), "failed");
        assert!(empty.is_empty());

        let err: UiState<Vec<u8>> = UiState::from_list(Err("offline"), "failed");
        assert_eq!(err.error_message(), Some("offline"));
    }

    #[test]
    fn test_fallback_message() {
        let err: UiState<u8> = UiState::from_result(Err(""), "Failed to load item details");
        assert_eq!(err.error_message(), Some("Failed to load item details"));
    }

    #[test]
    fn test_default_is_loading() {
        let state: UiState<()> = UiState::default();
        assert!(state.is_loading());
        assert!(!state.is_success());
        assert!(!state.is_error());
    }
}
