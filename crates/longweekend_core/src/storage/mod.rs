//! Holiday persistence over an unreliable key-value store.
//!
//! # Responsibility
//! - Define the injectable key-value store port and its backends.
//! - Load/save/validate/recover the holiday collection through one key.
//! - Classify store failures into a closed, user-facing error taxonomy.
//!
//! # Invariants
//! - Expected failures are returned as values, never panics.
//! - Every save overwrites the whole collection (last write wins).
//! - A fully unparsable payload is cleared so the next load starts clean.

pub mod config;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod port;
pub mod sqlite;
