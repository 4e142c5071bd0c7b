//! Binds a [`PressureTimer`] to the single tick source that drives it.

use std::time::Duration;

use crate::catalog::AcupressurePoint;
use crate::events::Event;

use super::engine::{PressureTimer, Tick};
use super::ticks::TickSource;

/// Pressure timer plus exclusive ownership of its tick source.
///
/// Every transition that stops the countdown disarms the source before the
/// timer state changes, and starting arms it with the timer's fresh epoch.
#[derive(Debug)]
pub struct TimerDriver<T: TickSource> {
    timer: PressureTimer,
    ticks: T,
    period: Duration,
}

impl<T: TickSource> TimerDriver<T> {
    pub fn new(ticks: T, period: Duration) -> Self {
        Self {
            timer: PressureTimer::new(),
            ticks,
            period,
        }
    }

    pub fn timer(&self) -> &PressureTimer {
        &self.timer
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn load(&mut self, point: &AcupressurePoint) {
        self.ticks.disarm();
        self.timer.load(point);
    }

    pub fn unload(&mut self) {
        self.ticks.disarm();
        self.timer.unload();
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.timer.start()?;
        self.ticks.arm(self.timer.epoch(), self.period);
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.ticks.disarm();
        self.timer.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.ticks.disarm();
        self.timer.reset()
    }

    /// Stop ticking without touching the countdown.
    pub fn halt(&mut self) {
        if self.timer.is_running() {
            self.pause();
        } else {
            self.ticks.disarm();
        }
    }

    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        let event = self.timer.tick(tick)?;
        if matches!(event, Event::TimerExpired { .. }) {
            self.ticks.disarm();
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::timer::{ManualTicks, TimerState};

    fn driver() -> TimerDriver<ManualTicks> {
        TimerDriver::new(ManualTicks::new(), Duration::from_secs(1))
    }

    #[test]
    fn start_arms_and_expiry_disarms() {
        let catalog = Catalog::builtin();
        let mut driver = driver();
        driver.load(catalog.point("shenmen").unwrap());
        driver.start();
        assert!(driver.ticks().is_armed());
        assert_eq!(driver.ticks().armed_epoch(), Some(driver.timer().epoch()));

        while let Some(tick) = driver.ticks().fire() {
            driver.on_tick(tick);
        }
        assert_eq!(driver.timer().state(), TimerState::Expired);
        assert_eq!(driver.timer().remaining_secs(), 0);
        assert!(!driver.ticks().is_armed());
    }

    #[test]
    fn switching_points_cancels_the_running_countdown() {
        let catalog = Catalog::builtin();
        let mut driver = driver();
        driver.load(catalog.point("hegu").unwrap());
        driver.start();
        let stale = driver.ticks().fire().unwrap();
        driver.on_tick(stale);
        assert_eq!(driver.timer().remaining_secs(), 59);

        driver.load(catalog.point("neiguan").unwrap());
        assert!(!driver.ticks().is_armed());
        assert_eq!(driver.timer().state(), TimerState::Idle);

        // A callback scheduled for hegu that still fires must not leak in.
        assert!(driver.on_tick(stale).is_none());
        assert_eq!(driver.timer().remaining_secs(), 45);

        driver.start();
        assert!(driver.on_tick(stale).is_none());
        let fresh = driver.ticks().fire().unwrap();
        driver.on_tick(fresh);
        assert_eq!(driver.timer().remaining_secs(), 44);
    }

    #[test]
    fn pause_and_reset_disarm() {
        let catalog = Catalog::builtin();
        let mut driver = driver();
        driver.load(catalog.point("houxi").unwrap());

        driver.toggle();
        assert!(driver.ticks().is_armed());
        driver.toggle();
        assert!(!driver.ticks().is_armed());
        assert_eq!(driver.timer().state(), TimerState::Paused);

        driver.start();
        driver.reset();
        assert!(!driver.ticks().is_armed());
        assert_eq!(driver.timer().remaining_secs(), 45);
        assert_eq!(driver.ticks().arm_count(), 2);
    }
}
