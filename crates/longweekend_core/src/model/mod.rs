//! Domain model for holidays and derived recommendations.
//!
//! # Responsibility
//! - Define the persisted holiday record and its validation rules.
//! - Define the derived recommendation projection.
//!
//! # Invariants
//! - Holidays are identified by a stable opaque string id.
//! - Recommendations carry no identity and are never persisted.

pub mod holiday;
pub mod recommendation;
