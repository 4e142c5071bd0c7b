//! Per-point pressure countdown.
//!
//! The timer is a pure state machine. It owns no clock and no thread: a
//! [`TickSource`](super::TickSource) delivers one tick per elapsed second,
//! each stamped with the [`TickEpoch`] that was current when the source was
//! armed. Every transition that arms or disarms the source moves to a new
//! epoch, so a tick from a cancelled source is recognised and ignored.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running -> Expired
//! any -> Idle (reset, point change)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::AcupressurePoint;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero. Only `reset` or a point change leaves it.
    Expired,
}

/// Generation counter identifying one armed tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TickEpoch(pub u64);

impl TickEpoch {
    fn next(self) -> Self {
        TickEpoch(self.0.wrapping_add(1))
    }
}

/// One elapsed time unit, as delivered by a tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: TickEpoch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressureTimer {
    point_id: Option<String>,
    state: TimerState,
    duration_secs: u32,
    remaining_secs: u32,
    epoch: TickEpoch,
}

impl Default for PressureTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureTimer {
    /// A timer with no point loaded.
    pub fn new() -> Self {
        Self {
            point_id: None,
            state: TimerState::Idle,
            duration_secs: 0,
            remaining_secs: 0,
            epoch: TickEpoch::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn point_id(&self) -> Option<&str> {
        self.point_id.as_deref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Epoch that ticks must carry to be counted.
    pub fn epoch(&self) -> TickEpoch {
        self.epoch
    }

    /// 0.0 .. 1.0 progress through the pressure duration.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.duration_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to a new point: back to `Idle` with its full duration.
    pub fn load(&mut self, point: &AcupressurePoint) {
        self.point_id = Some(point.id.clone());
        self.duration_secs = point.duration_secs;
        self.restore();
    }

    /// Forget the current point entirely.
    pub fn unload(&mut self) {
        self.point_id = None;
        self.duration_secs = 0;
        self.restore();
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                let point_id = self.point_id.clone()?;
                if self.remaining_secs == 0 {
                    return None;
                }
                self.state = TimerState::Running;
                self.epoch = self.epoch.next();
                Some(Event::TimerStarted {
                    point_id,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running | TimerState::Expired => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                self.epoch = self.epoch.next();
                Some(Event::TimerPaused {
                    point_id: self.point_id.clone().unwrap_or_default(),
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        let point_id = self.point_id.clone()?;
        self.restore();
        Some(Event::TimerReset {
            point_id,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Count one elapsed second.
    ///
    /// Ticks from another epoch, or arriving while not running, are ignored.
    /// Returns `TimerExpired` on the tick that reaches zero.
    pub fn tick(&mut self, tick: Tick) -> Option<Event> {
        if tick.epoch != self.epoch || self.state != TimerState::Running {
            return None;
        }
        let point_id = self.point_id.clone().unwrap_or_default();
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            self.epoch = self.epoch.next();
            return Some(Event::TimerExpired {
                point_id,
                at: Utc::now(),
            });
        }
        Some(Event::TimerTicked {
            point_id,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn restore(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_secs = self.duration_secs;
        self.epoch = self.epoch.next();
    }
}
