use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::app::Screen;
use crate::selection::ToggleOutcome;
use crate::session::SessionProgress;
use crate::timer::TimerState;

/// Every state change in the guide produces an Event.
/// The view layer renders from snapshots; hosts may log or stream events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SymptomToggled {
        symptom_id: String,
        outcome: ToggleOutcome,
        selected: usize,
        at: DateTime<Utc>,
    },
    AnalysisStarted {
        symptoms: Vec<String>,
        at: DateTime<Utc>,
    },
    AnalysisProgressed {
        percent: u8,
        tip_index: usize,
        at: DateTime<Utc>,
    },
    AnalysisCompleted {
        recommended: Vec<String>,
        at: DateTime<Utc>,
    },
    PointSelected {
        point_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        point_id: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        point_id: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerTicked {
        point_id: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        point_id: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The pressure duration elapsed. Completion is still up to the user.
    TimerExpired {
        point_id: String,
        at: DateTime<Utc>,
    },
    PointCompleted {
        point_id: String,
        completed_count: usize,
        at: DateTime<Utc>,
    },
    /// Advanced past the last recommended point.
    SessionExhausted {
        completed_count: usize,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        date: NaiveDate,
        points_used: Vec<String>,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionRestarted {
        at: DateTime<Utc>,
    },
    ScreenChanged {
        from: Screen,
        to: Screen,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        screen: Screen,
        selected_symptoms: Vec<String>,
        recommended: Vec<String>,
        current_point: Option<String>,
        progress: SessionProgress,
        timer_state: TimerState,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
}
