//! Holiday domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the storage gateway.
//! - Provide record-level validation shared by load and save paths.
//!
//! # Invariants
//! - `id`, `name` and `date` are non-empty after trimming.
//! - `id` is generated once and never reused for another holiday.
//! - `date` is an ISO `YYYY-MM-DD` local date string; calendar validity is
//!   checked by the recommendation engine, not here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque holiday identifier in its persisted string form.
pub type HolidayId = String;

/// Validation errors for holiday record invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayValidationError {
    EmptyId,
    EmptyName,
    EmptyDate,
}

impl Display for HolidayValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "holiday id must not be empty"),
            Self::EmptyName => write!(f, "holiday name must not be empty"),
            Self::EmptyDate => write!(f, "holiday date must not be empty"),
        }
    }
}

impl Error for HolidayValidationError {}

/// One user-maintained holiday.
///
/// Serialized field names match the stored JSON layout exactly:
/// `{"id": ..., "name": ..., "date": "YYYY-MM-DD"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub id: HolidayId,
    pub name: String,
    pub date: String,
}

impl HolidayRecord {
    /// Creates a holiday with a freshly generated id.
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self::with_id(generate_holiday_id(), name, date)
    }

    /// Creates a holiday with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    /// This constructor does not validate.
    pub fn with_id(
        id: impl Into<HolidayId>,
        name: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
        }
    }

    /// Validates record invariants.
    ///
    /// Fields are checked in declaration order; the first violation wins.
    pub fn validate(&self) -> Result<(), HolidayValidationError> {
        if self.id.trim().is_empty() {
            return Err(HolidayValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(HolidayValidationError::EmptyName);
        }
        if self.date.trim().is_empty() {
            return Err(HolidayValidationError::EmptyDate);
        }
        Ok(())
    }
}

/// Generates a new random holiday id (UUID v4, hyphenated).
pub fn generate_holiday_id() -> HolidayId {
    Uuid::new_v4().to_string()
}
