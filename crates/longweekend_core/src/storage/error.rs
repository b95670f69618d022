//! Storage error taxonomy and failure classification.
//!
//! # Responsibility
//! - Define the closed set of storage failure kinds consumed by the UI.
//! - Map store and parse failures onto that set.
//!
//! # Invariants
//! - Every `StorageError` carries kind, internal message and user message.
//! - Internal messages describe the failure, never the stored payload.

use super::port::StoreError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUOTA_USER_MESSAGE: &str =
    "Storage is full. Delete some holidays or clear site data to free up space.";
const SECURITY_USER_MESSAGE: &str =
    "Unable to access storage. Your browser may be restricting storage, for example in private browsing mode.";
const CORRUPTION_USER_MESSAGE: &str =
    "Your saved holidays were corrupted and have been reset.";
const GENERIC_USER_MESSAGE: &str = "Something went wrong with storage. Please try again.";

/// Closed set of storage failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageErrorKind {
    QuotaExceeded,
    SecurityError,
    GenericError,
    CorruptionError,
}

impl StorageErrorKind {
    /// Stable wire/log name, e.g. `QUOTA_EXCEEDED`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::SecurityError => "SECURITY_ERROR",
            Self::GenericError => "GENERIC_ERROR",
            Self::CorruptionError => "CORRUPTION_ERROR",
        }
    }

    fn default_user_message(self) -> &'static str {
        match self {
            Self::QuotaExceeded => QUOTA_USER_MESSAGE,
            Self::SecurityError => SECURITY_USER_MESSAGE,
            Self::GenericError => GENERIC_USER_MESSAGE,
            Self::CorruptionError => CORRUPTION_USER_MESSAGE,
        }
    }
}

impl Display for StorageErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage failure returned by gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageError {
    #[serde(rename = "type")]
    pub kind: StorageErrorKind,
    /// Internal diagnostic for logs.
    pub message: String,
    /// End-user-safe explanation.
    pub user_message: String,
}

impl StorageError {
    /// Builds an error with the kind's standard user message.
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            user_message: kind.default_user_message().to_string(),
        }
    }

    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::QuotaExceeded, message)
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::SecurityError, message)
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::GenericError, message)
    }

    pub fn corruption(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::CorruptionError, message)
    }

    /// Classifies a store failure raised while performing `operation`.
    pub fn from_store_error(operation: &str, err: &StoreError) -> Self {
        let message = format!("{operation} failed: {err}");
        match err {
            StoreError::QuotaExceeded { .. } => Self::quota_exceeded(message),
            StoreError::AccessDenied(_) => Self::security(message),
            StoreError::Db(_) | StoreError::Backend(_) => Self::generic(message),
        }
    }

    /// Classifies a payload parse failure on load.
    ///
    /// `serde_json` messages carry only position and category, never the
    /// offending input.
    pub fn from_parse_error(err: &serde_json::Error) -> Self {
        Self::corruption(format!(
            "stored holidays are not valid JSON ({:?} at line {} column {})",
            err.classify(),
            err.line(),
            err.column()
        ))
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for StorageError {}
