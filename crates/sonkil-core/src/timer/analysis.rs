//! Synthetic progress indicator shown while recommendations are "analysed".
//!
//! The counter is decorative: it advances on its own fast loading ticks and
//! says nothing about real elapsed time.

use serde::{Deserialize, Serialize};

pub const PRESSURE_TIPS: [&str; 4] = [
    "Press until it feels relieving, never painful",
    "Breathe slowly and deeply while pressing for a better effect",
    "Two or three short sessions a day work best",
    "Drink some water after your session",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub step_ms: u64,
    pub step_percent: u8,
    pub tip_interval_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            step_ms: 50,
            step_percent: 2,
            tip_interval_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisProgress {
    percent: u8,
    elapsed_ms: u64,
    settings: AnalysisSettings,
}

impl AnalysisProgress {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self {
            percent: 0,
            elapsed_ms: 0,
            settings,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    pub fn tip_index(&self) -> usize {
        let interval = self.settings.tip_interval_ms.max(1);
        ((self.elapsed_ms / interval) as usize) % PRESSURE_TIPS.len()
    }

    pub fn tip(&self) -> &'static str {
        PRESSURE_TIPS[self.tip_index()]
    }

    /// Advance one loading step. Returns true once the bar is full.
    pub fn step(&mut self) -> bool {
        if !self.is_complete() {
            self.percent = self
                .percent
                .saturating_add(self.settings.step_percent.max(1))
                .min(100);
            self.elapsed_ms = self.elapsed_ms.saturating_add(self.settings.step_ms);
        }
        self.is_complete()
    }

    pub fn restart(&mut self) {
        self.percent = 0;
        self.elapsed_ms = 0;
    }
}
