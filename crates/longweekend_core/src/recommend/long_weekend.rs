//! Bridge-day classification and recommendation assembly.
//!
//! # Responsibility
//! - Classify each holiday by weekday into zero or one bridge candidate.
//! - Drop candidates that collide with any holiday in the input.
//! - Order recommendations by originating holiday date.
//!
//! # Invariants
//! - Thursday holidays suggest the following Friday.
//! - Tuesday holidays suggest the preceding Monday.
//! - All other weekdays suggest nothing.
//! - Output is stable-sorted ascending by holiday date.

use crate::model::holiday::HolidayRecord;
use crate::model::recommendation::Recommendation;
use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Computes long weekend recommendations for the given holidays.
///
/// Holidays whose date is not a valid `YYYY-MM-DD` calendar date contribute
/// nothing. A candidate that falls on any listed holiday is discarded.
pub fn calculate_recommendations(holidays: &[HolidayRecord]) -> Vec<Recommendation> {
    let parsed: Vec<(&HolidayRecord, NaiveDate)> = holidays
        .iter()
        .filter_map(|holiday| parse_holiday_date(&holiday.date).map(|date| (holiday, date)))
        .collect();

    let holiday_dates: HashSet<NaiveDate> = parsed.iter().map(|(_, date)| *date).collect();

    let mut keyed: Vec<(NaiveDate, Recommendation)> = parsed
        .into_iter()
        .filter_map(|(holiday, date)| {
            let recommended = bridge_day(date)?;
            if holiday_dates.contains(&recommended) {
                return None;
            }
            Some((date, build_recommendation(holiday, date, recommended)))
        })
        .collect();

    // `sort_by_key` is stable, so same-date holidays keep input order.
    keyed.sort_by_key(|(date, _)| *date);
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Parses a strict ISO `YYYY-MM-DD` local date.
///
/// Returns `None` for shape mismatches (e.g. `2025-1-5`) and for dates that
/// do not exist on the calendar (e.g. `2025-02-29`).
pub fn parse_holiday_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Returns the adjacent working day that bridges `holiday` to a weekend.
pub fn bridge_day(holiday: NaiveDate) -> Option<NaiveDate> {
    match holiday.weekday() {
        Weekday::Thu => holiday.succ_opt(),
        Weekday::Tue => holiday.pred_opt(),
        _ => None,
    }
}

/// Counts the contiguous days off formed by `holiday`, `day_off` and the
/// adjoining weekend.
pub fn long_weekend_length(holiday: NaiveDate, day_off: NaiveDate) -> u32 {
    let (mut start, mut end) = if holiday <= day_off {
        (holiday, day_off)
    } else {
        (day_off, holiday)
    };
    let mut length = (end - start).num_days() as u32 + 1;

    while let Some(prev) = start.pred_opt().filter(|d| is_weekend(*d)) {
        start = prev;
        length += 1;
    }
    while let Some(next) = end.succ_opt().filter(|d| is_weekend(*d)) {
        end = next;
        length += 1;
    }
    length
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn build_recommendation(
    holiday: &HolidayRecord,
    holiday_date: NaiveDate,
    recommended: NaiveDate,
) -> Recommendation {
    let recommended_day = weekday_name(recommended);
    let explanation = format!(
        "Take {}, {} off to make a {}-day weekend!",
        recommended_day,
        recommended.format("%b %-d"),
        long_weekend_length(holiday_date, recommended)
    );

    Recommendation {
        holiday_name: holiday.name.clone(),
        holiday_date: holiday_date.format(ISO_DATE_FORMAT).to_string(),
        holiday_day_of_week: weekday_name(holiday_date),
        recommended_date: recommended.format(ISO_DATE_FORMAT).to_string(),
        recommended_day,
        explanation,
    }
}

fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
