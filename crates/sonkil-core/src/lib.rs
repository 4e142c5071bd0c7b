//! # Sonkil Core Library
//!
//! Core logic for Sonkil, a hand acupressure guide. Users pick up to five
//! symptoms, get a recommended sequence of acupressure points, press each
//! point through a timed countdown, and build a daily history with a streak.
//! Front ends (the bundled CLI or any other view layer) drive a
//! [`GuideApp`] with user intents and render its snapshots.
//!
//! ## Architecture
//!
//! - **Catalog**: static symptom and point tables with `Result`-returning lookups
//! - **Recommendation**: deduplicated, order-preserving symptom → point resolution
//! - **Session**: progress through the recommended points
//! - **Timer**: a tick-driven countdown state machine; ticks come from an
//!   injected [`TickSource`] and carry an epoch so cancelled sources never leak
//! - **History**: one record per day behind a [`HistoryBackend`], with streak,
//!   recent-record and calendar statistics
//! - **Storage**: SQLite key-value backend and TOML configuration
//!
//! ## Key Components
//!
//! - [`GuideApp`]: session controller and screen state machine
//! - [`PressureTimer`]: per-point countdown
//! - [`HistoryStore`]: history persistence and statistics
//! - [`Config`]: application configuration management

pub mod app;
pub mod catalog;
pub mod error;
pub mod events;
pub mod history;
pub mod recommend;
pub mod selection;
pub mod session;
pub mod storage;
pub mod timer;

pub use app::{share_message, AppSnapshot, GuideApp, GuideSettings, Screen, TimerView};
pub use catalog::{AcupressurePoint, Catalog, Category, Hand, Position, Pressure, Side, Symptom};
pub use error::{CatalogKind, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use history::{
    CalendarDay, HistoryBackend, HistoryRecord, HistoryStats, HistoryStore, MemoryBackend,
    MonthCalendar, HISTORY_KEY,
};
pub use recommend::resolve;
pub use selection::{SymptomSelection, ToggleOutcome, MAX_SELECTED_SYMPTOMS};
pub use session::{Advance, SessionProgress, SessionTracker};
pub use storage::{Config, Database};
pub use timer::{
    AnalysisProgress, AnalysisSettings, IntervalTicks, ManualTicks, PressureTimer, Tick,
    TickEpoch, TickSource, TimerDriver, TimerState,
};
