use thiserror::Error;

use crate::criteria::FilterField;

/// Shown to the user whenever a listing fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch events. Make sure the backend is running.";

/// The only way a fetch can fail. Covers connection errors, non-success
/// statuses and undecodable bodies alike.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),
    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: FilterField, value: String },
    #[error("{field} '{value}' is not one of the known options")]
    UnknownOption { field: FilterField, value: String },
}
