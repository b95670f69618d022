//! Long weekend recommendation engine.
//!
//! # Responsibility
//! - Derive extra days off that bridge a holiday to the weekend.
//!
//! # Invariants
//! - Derivation is pure: no I/O, no input mutation, deterministic output.
//! - Malformed holiday dates are skipped, never raised.

pub mod long_weekend;
