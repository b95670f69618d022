//! Holiday planner use-case service.
//!
//! # Responsibility
//! - Hold the holiday list and its recommendations in memory.
//! - Persist every mutation through `StorageGateway`.
//! - Surface load-time storage problems as a dismissible notice.
//!
//! # Invariants
//! - Recommendations always reflect the current in-memory holiday list.
//! - A mutation whose save fails is rolled back; memory and store agree.
//! - After a failed read, mutations reload first and are refused until the
//!   stored collection has been read, so unread data is never overwritten.
//! - Input is trimmed before validation and persistence.

use crate::model::holiday::{HolidayId, HolidayRecord};
use crate::model::recommendation::Recommendation;
use crate::recommend::long_weekend::{calculate_recommendations, parse_holiday_date};
use crate::storage::error::StorageError;
use crate::storage::gateway::{QuotaInfo, StorageGateway};
use crate::storage::port::KeyValueStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for planner mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Name is empty after trimming.
    EmptyName,
    /// Date is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Target holiday does not exist.
    NotFound(HolidayId),
    /// Persisting the mutation failed; memory was left unchanged.
    Storage(StorageError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "holiday name must not be empty"),
            Self::InvalidDate(value) => {
                write!(f, "invalid holiday date `{value}`; expected YYYY-MM-DD")
            }
            Self::NotFound(id) => write!(f, "holiday not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for PlannerError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// In-memory planner state backed by a storage gateway.
pub struct HolidayPlanner<S: KeyValueStore> {
    gateway: StorageGateway<S>,
    holidays: Vec<HolidayRecord>,
    recommendations: Vec<Recommendation>,
    notice: Option<StorageError>,
    needs_reload: bool,
}

impl<S: KeyValueStore> HolidayPlanner<S> {
    /// Loads persisted holidays and computes initial recommendations.
    pub fn open(gateway: StorageGateway<S>) -> Self {
        let outcome = gateway.load_holidays();
        let needs_reload = outcome.error.is_some() && !outcome.had_corruption;
        let notice = match (outcome.error, outcome.had_corruption) {
            (Some(err), _) => Some(err),
            (None, true) => Some(StorageError::corruption(
                "some stored holidays were invalid and have been removed",
            )),
            (None, false) => None,
        };

        let mut planner = Self {
            gateway,
            holidays: outcome.holidays,
            recommendations: Vec::new(),
            notice,
            needs_reload,
        };
        planner.refresh_recommendations();
        info!(
            "event=planner_open module=service status=ok holidays={} recommendations={} notice={}",
            planner.holidays.len(),
            planner.recommendations.len(),
            planner.notice.as_ref().map_or("none", |err| err.kind.as_str())
        );
        planner
    }

    pub fn holidays(&self) -> &[HolidayRecord] {
        &self.holidays
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Pending storage notice from load, if any.
    pub fn notice(&self) -> Option<&StorageError> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn gateway(&self) -> &StorageGateway<S> {
        &self.gateway
    }

    pub fn quota_info(&self) -> QuotaInfo {
        self.gateway.storage_quota_info()
    }

    /// Adds a holiday with a fresh id and persists the new list.
    pub fn add_holiday(
        &mut self,
        name: &str,
        date: &str,
    ) -> Result<HolidayRecord, PlannerError> {
        let name = name.trim();
        let date = date.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyName);
        }
        if parse_holiday_date(date).is_none() {
            return Err(PlannerError::InvalidDate(date.to_string()));
        }

        self.ensure_loaded()?;
        let holiday = HolidayRecord::new(name, date);
        let mut next = self.holidays.clone();
        next.push(holiday.clone());
        self.commit(next)?;
        Ok(holiday)
    }

    /// Removes a holiday by id and persists the new list.
    pub fn remove_holiday(&mut self, id: &str) -> Result<HolidayRecord, PlannerError> {
        self.ensure_loaded()?;
        let position = self
            .holidays
            .iter()
            .position(|holiday| holiday.id == id)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))?;

        let mut next = self.holidays.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    /// Retries a load that failed at open time.
    fn ensure_loaded(&mut self) -> Result<(), PlannerError> {
        if !self.needs_reload {
            return Ok(());
        }

        let outcome = self.gateway.load_holidays();
        if let Some(err) = outcome.error {
            if !outcome.had_corruption {
                warn!(
                    "event=planner_reload module=service status=refused error_type={}",
                    err.kind
                );
                return Err(err.into());
            }
        }

        self.holidays = outcome.holidays;
        self.needs_reload = false;
        self.refresh_recommendations();
        info!(
            "event=planner_reload module=service status=ok holidays={}",
            self.holidays.len()
        );
        Ok(())
    }

    fn commit(&mut self, next: Vec<HolidayRecord>) -> Result<(), PlannerError> {
        if let Err(err) = self.gateway.save_holidays(&next) {
            warn!(
                "event=planner_commit module=service status=rolled_back error_type={}",
                err.kind
            );
            return Err(err.into());
        }
        self.holidays = next;
        self.refresh_recommendations();
        Ok(())
    }

    fn refresh_recommendations(&mut self) {
        self.recommendations = calculate_recommendations(&self.holidays);
    }
}
