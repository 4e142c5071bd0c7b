//! Tick sources that drive the pressure countdown.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::engine::{Tick, TickEpoch};

/// A scheduler that delivers periodic [`Tick`]s.
///
/// At most one schedule is armed at a time: arming replaces whatever was
/// armed before, and `disarm` cancels it.
pub trait TickSource {
    fn arm(&mut self, epoch: TickEpoch, period: Duration);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Synthetic tick source. Ticks are produced on demand with [`fire`](Self::fire).
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    armed: Option<(TickEpoch, Duration)>,
    arm_count: usize,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the armed schedule would deliver next, if any.
    pub fn fire(&self) -> Option<Tick> {
        self.armed.map(|(epoch, _)| Tick { epoch })
    }

    pub fn armed_epoch(&self) -> Option<TickEpoch> {
        self.armed.map(|(epoch, _)| epoch)
    }

    pub fn period(&self) -> Option<Duration> {
        self.armed.map(|(_, period)| period)
    }

    /// How many times a schedule has been armed.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }
}

impl TickSource for ManualTicks {
    fn arm(&mut self, epoch: TickEpoch, period: Duration) {
        self.armed = Some((epoch, period));
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = None;
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

/// Wall-clock tick source backed by a tokio interval task.
///
/// Ticks arrive on the receiver returned by [`IntervalTicks::new`]. Must be
/// armed from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicks {
    tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicks {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, task: None }, rx)
    }
}

impl TickSource for IntervalTicks {
    fn arm(&mut self, epoch: TickEpoch, period: Duration) {
        self.disarm();
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(epoch = epoch.0, ?period, "tick source armed");
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::trace!("tick source disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for IntervalTicks {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_ticks_follow_the_latest_arm() {
        let mut ticks = ManualTicks::new();
        assert!(ticks.fire().is_none());

        ticks.arm(TickEpoch(1), Duration::from_secs(1));
        ticks.arm(TickEpoch(2), Duration::from_secs(1));
        assert_eq!(ticks.fire(), Some(Tick { epoch: TickEpoch(2) }));
        assert_eq!(ticks.arm_count(), 2);

        ticks.disarm();
        assert!(!ticks.is_armed());
        assert!(ticks.fire().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_carry_epoch_and_stop_on_disarm() {
        let (mut ticks, mut rx) = IntervalTicks::new();
        ticks.arm(TickEpoch(7), Duration::from_secs(1));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.epoch, TickEpoch(7));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.epoch, TickEpoch(7));

        ticks.disarm();
        assert!(!ticks.is_armed());
        let after = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(after.is_err(), "no ticks after disarm");
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_schedule() {
        let (mut ticks, mut rx) = IntervalTicks::new();
        ticks.arm(TickEpoch(1), Duration::from_secs(1));
        ticks.arm(TickEpoch(2), Duration::from_secs(1));

        for _ in 0..3 {
            assert_eq!(rx.recv().await.unwrap().epoch, TickEpoch(2));
        }
    }
}
