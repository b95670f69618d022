//! Core domain logic for the long weekend planner.
//! This crate owns holiday persistence and recommendation derivation.

pub mod db;
pub mod logging;
pub mod model;
pub mod recommend;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::holiday::{generate_holiday_id, HolidayId, HolidayRecord, HolidayValidationError};
pub use model::recommendation::Recommendation;
pub use recommend::long_weekend::{calculate_recommendations, parse_holiday_date};
pub use service::planner_service::{HolidayPlanner, PlannerError};
pub use storage::config::GatewayConfig;
pub use storage::error::{StorageError, StorageErrorKind};
pub use storage::gateway::{LoadOutcome, QuotaInfo, StorageGateway};
pub use storage::memory::InMemoryStore;
pub use storage::port::{KeyValueStore, StoreError, StoreResult};
pub use storage::sqlite::SqliteKeyValueStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
