//! Completed-session history and the statistics derived from it.
//!
//! At most one record exists per calendar date. The whole sequence is
//! serialized as one JSON array under a single storage key and rewritten on
//! every write.

mod backend;
mod store;

pub use backend::{HistoryBackend, MemoryBackend};
pub use store::HistoryStore;

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Storage key the history array lives under.
pub const HISTORY_KEY: &str = "sonkil-history";

/// Seconds credited per point in a recorded session. A flat approximation,
/// not a measurement of elapsed time.
pub const CREDITED_SECS_PER_POINT: u32 = 60;

/// Default number of records in the recent list.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub symptoms: Vec<String>,
    pub points_used: Vec<String>,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub completed: bool,
}

impl HistoryRecord {
    pub fn completed(date: NaiveDate, symptoms: &[String], points_used: &[String]) -> Self {
        let points = u32::try_from(points_used.len()).unwrap_or(u32::MAX);
        Self {
            date,
            symptoms: symptoms.to_vec(),
            points_used: points_used.to_vec(),
            duration_secs: points.saturating_mul(CREDITED_SECS_PER_POINT),
            completed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_sessions: usize,
    pub streak_days: u32,
    pub last_session: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_record: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st, Sunday = 0.
    pub first_weekday: u32,
    pub days: Vec<CalendarDay>,
}

fn completed_dates(records: &[HistoryRecord]) -> BTreeSet<NaiveDate> {
    records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect()
}

/// Number of completed records.
pub fn total_sessions(records: &[HistoryRecord]) -> usize {
    records.iter().filter(|r| r.completed).count()
}

/// Consecutive days with a completed session.
///
/// Zero unless today or yesterday has a record. The run is counted over all
/// completed dates from the newest down, so a date after `today` joins the
/// run it is adjacent to.
pub fn compute_streak(records: &[HistoryRecord], today: NaiveDate) -> u32 {
    let dates = completed_dates(records);
    let yesterday = today - Duration::days(1);
    if !dates.contains(&today) && !dates.contains(&yesterday) {
        return 0;
    }

    let mut descending = dates.iter().rev();
    let Some(mut previous) = descending.next().copied() else {
        return 0;
    };
    let mut streak = 1;
    for &date in descending {
        if previous - date != Duration::days(1) {
            break;
        }
        streak += 1;
        previous = date;
    }
    streak
}

/// Completed records, newest first, at most `limit`.
pub fn recent_records(records: &[HistoryRecord], limit: usize) -> Vec<HistoryRecord> {
    let mut recent: Vec<HistoryRecord> = records.iter().filter(|r| r.completed).cloned().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(limit);
    recent
}

/// Calendar grid for one month.
pub fn month_calendar(
    records: &[HistoryRecord],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidValue {
            field: "month".into(),
            message: format!("{year}-{month:02} is not a calendar month"),
        }
    })?;
    let dates = completed_dates(records);
    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| CalendarDay {
            date,
            has_record: dates.contains(&date),
            is_today: date == today,
        })
        .collect();
    Ok(MonthCalendar {
        year,
        month,
        first_weekday: first.weekday().num_days_from_sunday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(date: &str, completed: bool) -> HistoryRecord {
        HistoryRecord {
            date: day(date),
            symptoms: vec!["stress".into()],
            points_used: vec!["shenmen".into()],
            duration_secs: 60,
            completed,
        }
    }

    #[test]
    fn three_consecutive_days_make_a_streak_of_three() {
        let records = vec![
            record("2024-03-08", true),
            record("2024-03-10", true),
            record("2024-03-09", true),
        ];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 3);
    }

    #[test]
    fn gap_caps_the_streak() {
        let records = vec![
            record("2024-03-06", true),
            record("2024-03-07", true),
            record("2024-03-09", true),
            record("2024-03-10", true),
        ];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 2);
    }

    #[test]
    fn streak_may_end_yesterday() {
        let records = vec![record("2024-03-08", true), record("2024-03-09", true)];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 2);
    }

    #[test]
    fn stale_history_has_no_streak() {
        let records = vec![record("2024-03-07", true), record("2024-03-08", true)];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 0);
        assert_eq!(compute_streak(&[], day("2024-03-10")), 0);
    }

    #[test]
    fn incomplete_records_do_not_count() {
        let records = vec![record("2024-03-09", false), record("2024-03-10", true)];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 1);
        assert_eq!(total_sessions(&records), 1);
    }

    #[test]
    fn date_ahead_of_today_joins_the_run() {
        let records = vec![record("2024-03-10", true), record("2024-03-11", true)];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 2);

        // Detached from today: only the anchor check applies.
        let records = vec![record("2024-03-10", true), record("2024-03-20", true)];
        assert_eq!(compute_streak(&records, day("2024-03-10")), 1);
    }

    #[test]
    fn streak_crosses_month_boundaries() {
        let records = vec![record("2024-02-28", true), record("2024-02-29", true), record("2024-03-01", true)];
        assert_eq!(compute_streak(&records, day("2024-03-01")), 3);
    }

    #[test]
    fn recent_records_are_completed_newest_first() {
        let records: Vec<HistoryRecord> = (1..=8)
            .map(|d| record(&format!("2024-03-{d:02}"), d != 7))
            .collect();
        let recent = recent_records(&records, RECENT_LIMIT);
        let dates: Vec<String> = recent.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, ["2024-03-08", "2024-03-06", "2024-03-05", "2024-03-04", "2024-03-03"]);
    }

    #[test]
    fn calendar_marks_records_and_today() {
        let records = vec![record("2024-02-03", true), record("2024-02-04", false)];
        let calendar = month_calendar(&records, 2024, 2, day("2024-02-10")).unwrap();
        assert_eq!(calendar.days.len(), 29);
        // 2024-02-01 was a Thursday.
        assert_eq!(calendar.first_weekday, 4);
        assert!(calendar.days[2].has_record);
        assert!(!calendar.days[3].has_record);
        assert!(calendar.days[9].is_today);
        assert_eq!(calendar.days.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn calendar_rejects_invalid_month() {
        assert!(month_calendar(&[], 2024, 13, day("2024-02-10")).is_err());
    }

    #[test]
    fn record_serializes_with_storage_field_names() {
        let record = HistoryRecord::completed(
            day("2024-03-10"),
            &["headache".into()],
            &["hegu".into(), "yintang".into()],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["pointsUsed"][1], "yintang");
        assert_eq!(json["duration"], 120);
        assert_eq!(json["completed"], true);
    }
}
