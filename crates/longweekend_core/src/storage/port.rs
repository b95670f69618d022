//! Key-value store port consumed by the storage gateway.
//!
//! # Responsibility
//! - Abstract browser-like string storage behind a small trait.
//! - Name the failure conditions the gateway needs to tell apart.
//!
//! # Invariants
//! - Implementations report quota and access failures through the dedicated
//!   `StoreError` variants so classification stays backend-agnostic.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a key-value store operation.
#[derive(Debug)]
pub enum StoreError {
    /// The write would exceed the backend's capacity.
    QuotaExceeded {
        requested_bytes: usize,
        limit_bytes: usize,
    },
    /// The backend refuses access (disabled, private mode, read-only).
    AccessDenied(String),
    /// SQLite transport failure.
    Db(DbError),
    /// Any other backend-specific failure.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                requested_bytes,
                limit_bytes,
            } => write!(
                f,
                "store quota exceeded: {requested_bytes} bytes requested, limit {limit_bytes}"
            ),
            Self::AccessDenied(reason) => write!(f, "store access denied: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// String key-value storage with `localStorage`-like semantics.
///
/// Methods take `&self`; implementations use interior mutability where
/// needed. Stores are single-threaded and provide no transactions.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
    /// Lists every stored entry, used for usage estimation.
    fn entries(&self) -> StoreResult<Vec<(String, String)>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        (**self).entries()
    }
}

/// Byte footprint of one entry, as used by quota accounting.
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
