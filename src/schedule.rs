// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Occurrence computation for training reminder schedules
//!
//! Schedules store weekday names and a "HH:MM" time as plain strings;
//! entries that fail to parse are skipped rather than rejected, in line
//! with the rest of the crate's degrade-don't-fail handling. Delivering
//! a reminder at the computed instant is the caller's concern.

use crate::models::Schedule;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use std::str::FromStr;

/// The next instant a schedule fires strictly after `after`
///
/// Returns `None` for disabled schedules, unparseable times, or day
/// lists with no recognizable weekday.
pub fn next_occurrence(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !schedule.enabled {
        return None;
    }

    let time = NaiveTime::parse_from_str(&schedule.time, "%H:%M").ok()?;

    let days: Vec<Weekday> = schedule
        .days
        .iter()
        .filter_map(|d| Weekday::from_str(d).ok())
        .collect();
    if days.is_empty() {
        return None;
    }

    // Walk forward one week; offset 7 catches today's weekday once the
    // fire time has already passed
    for offset in 0..=7 {
        let date = after.date_naive() + Duration::days(offset);
        if !days.contains(&date.weekday()) {
            continue;
        }

        let candidate = date.and_time(time).and_utc();
        if candidate > after {
            return Some(candidate);
        }
    }

    None
}

/// The earliest firing schedule among `schedules` strictly after `after`
pub fn upcoming<'a>(
    schedules: &'a [Schedule],
    after: DateTime<Utc>,
) -> Option<(&'a Schedule, DateTime<Utc>)> {
    schedules
        .iter()
        .filter_map(|s| next_occurrence(s, after).map(|at| (s, at)))
        .min_by_key(|(_, at)| *at)
}
