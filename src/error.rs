//! Error types for the wanted-person checker.

use thiserror::Error;

/// Failures that end a single search or a single menu action.
///
/// None of these is fatal to the process: the session reports the error and
/// goes back to idle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Network unreachable, non-2xx response or request timeout.
    #[error("dataset fetch failed: {0}")]
    Fetch(String),

    /// Payload could not be read as a list of records.
    #[error("dataset decode failed: {0}")]
    Decode(String),

    /// The blocking worker running the fetch or the scan went away.
    #[error("search worker failed: {0}")]
    Worker(String),

    /// Reuse was requested but nothing has been saved yet.
    #[error("no saved search parameters")]
    NoSavedParameters,
}

impl CheckError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Everything except a missing saved query is worth retrying.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::NoSavedParameters)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// A line on the transport could not be turned into an interaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("invalid json")]
    InvalidJson,

    #[error("unknown command")]
    UnknownCommand,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown button: {0}")]
    UnknownButton(String),
}
