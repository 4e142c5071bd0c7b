//! The guided-session controller.
//!
//! [`GuideApp`] is the session context a view layer drives: it owns the
//! symptom selection, the session tracker, the pressure timer with its tick
//! source, and the history store. Every intent returns the events it
//! produced; [`GuideApp::snapshot`] returns everything a view renders.
//!
//! ## Screens
//!
//! ```text
//! Selection -> Loading -> Results -> Guide -> Completed
//!     ^                     ^  |       |          |
//!     |                     |  +-------+----------+
//!     +------ History <----------------------------+
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{AcupressurePoint, Catalog};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::history::{HistoryBackend, HistoryRecord, HistoryStats, HistoryStore};
use crate::recommend::resolve;
use crate::selection::{SymptomSelection, ToggleOutcome};
use crate::session::{Advance, SessionProgress, SessionTracker};
use crate::storage::Config;
use crate::timer::{AnalysisProgress, AnalysisSettings, Tick, TickSource, TimerDriver, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Selection,
    Loading,
    Results,
    Guide,
    Completed,
    History,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Selection => "selection",
            Screen::Loading => "loading",
            Screen::Results => "results",
            Screen::Guide => "guide",
            Screen::Completed => "completed",
            Screen::History => "history",
        }
    }

    /// Where the back action leads from this screen.
    pub fn back(&self) -> Screen {
        match self {
            Screen::Guide | Screen::Completed => Screen::Results,
            Screen::Selection
            | Screen::Loading
            | Screen::Results
            | Screen::History => Screen::Selection,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for a [`GuideApp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideSettings {
    pub tick_interval: std::time::Duration,
    pub analysis: AnalysisSettings,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GuideSettings {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            analysis: config.analysis_settings(),
        }
    }
}

/// Timer view of the displayed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub state: TimerState,
    pub remaining_secs: u32,
    pub duration_secs: u32,
    pub progress: f64,
}

/// Everything the view layer renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub screen: Screen,
    pub selected_symptoms: Vec<String>,
    pub recommended: Vec<String>,
    pub current_point: Option<AcupressurePoint>,
    pub progress: SessionProgress,
    pub timer: TimerView,
    pub analysis_percent: u8,
    pub analysis_tip: String,
}

/// Message for the share/clipboard action on the completion screen.
pub fn share_message(completed_points: usize) -> String {
    format!("Today I completed {completed_points} acupressure points with Sonkil! 🙌")
}

type Clock = Box<dyn Fn() -> NaiveDate + Send>;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Session context for one user: selection, progress, timer and history.
pub struct GuideApp<'c, B: HistoryBackend, T: TickSource> {
    catalog: &'c Catalog,
    screen: Screen,
    selection: SymptomSelection,
    analysis: AnalysisProgress,
    tracker: SessionTracker<'c>,
    timer: TimerDriver<T>,
    history: HistoryStore<B>,
    clock: Clock,
}

impl<'c, B: HistoryBackend, T: TickSource> GuideApp<'c, B, T> {
    pub fn new(catalog: &'c Catalog, history: HistoryStore<B>, ticks: T, settings: GuideSettings) -> Self {
        Self {
            catalog,
            screen: Screen::Selection,
            selection: SymptomSelection::default(),
            analysis: AnalysisProgress::new(settings.analysis),
            tracker: SessionTracker::new(catalog),
            timer: TimerDriver::new(ticks, settings.tick_interval),
            history,
            clock: Box::new(utc_today),
        }
    }

    /// Replace the source of "today" used when recording sessions.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn selection(&self) -> &SymptomSelection {
        &self.selection
    }

    pub fn tracker(&self) -> &SessionTracker<'c> {
        &self.tracker
    }

    pub fn timer(&self) -> &TimerDriver<T> {
        &self.timer
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        self.timer.ticks_mut()
    }

    pub fn history(&self) -> &HistoryStore<B> {
        &self.history
    }

    pub fn current_point(&self) -> Option<&'c AcupressurePoint> {
        self.tracker.current()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn history_records(&self) -> Vec<HistoryRecord> {
        self.history.load_all()
    }

    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats(self.today())
    }

    pub fn share_message(&self) -> String {
        share_message(self.tracker.completed_count())
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let timer = self.timer.timer();
        AppSnapshot {
            screen: self.screen,
            selected_symptoms: self.selection.ids(),
            recommended: self.tracker.recommended().to_vec(),
            current_point: self.tracker.current().cloned(),
            progress: self.tracker.progress(),
            timer: TimerView {
                state: timer.state(),
                remaining_secs: timer.remaining_secs(),
                duration_secs: timer.duration_secs(),
                progress: timer.progress(),
            },
            analysis_percent: self.analysis.percent(),
            analysis_tip: self.analysis.tip().to_owned(),
        }
    }

    /// Compact snapshot in event form.
    pub fn snapshot_event(&self) -> Event {
        let timer = self.timer.timer();
        Event::StateSnapshot {
            screen: self.screen,
            selected_symptoms: self.selection.ids(),
            recommended: self.tracker.recommended().to_vec(),
            current_point: self.tracker.current().map(|p| p.id.clone()),
            progress: self.tracker.progress(),
            timer_state: timer.state(),
            remaining_secs: timer.remaining_secs(),
            at: Utc::now(),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Add or remove a symptom. Adds beyond the cap are rejected.
    pub fn toggle_symptom(&mut self, symptom_id: &str) -> Result<Event> {
        self.require(Screen::Selection, "toggle symptom")?;
        self.catalog.symptom(symptom_id)?;
        let outcome = self.selection.toggle(symptom_id);
        if outcome == ToggleOutcome::Rejected {
            tracing::debug!(symptom = symptom_id, cap = self.selection.cap(), "selection full");
        }
        Ok(Event::SymptomToggled {
            symptom_id: symptom_id.to_owned(),
            outcome,
            selected: self.selection.len(),
            at: Utc::now(),
        })
    }

    /// Begin analysing the current selection.
    pub fn analyze(&mut self) -> Result<Vec<Event>> {
        self.require(Screen::Selection, "analyze")?;
        if self.selection.is_empty() {
            return Err(ValidationError::EmptyCollection("selected symptoms".into()).into());
        }
        self.analysis.restart();
        let mut events = vec![Event::AnalysisStarted {
            symptoms: self.selection.ids(),
            at: Utc::now(),
        }];
        events.extend(self.go(Screen::Loading));
        Ok(events)
    }

    /// One step of the analysis progress indicator. When the bar fills,
    /// the recommendation is resolved and the results screen shown.
    pub fn loading_tick(&mut self) -> Vec<Event> {
        if self.screen != Screen::Loading {
            return Vec::new();
        }
        if self.analysis.step() {
            return self.complete_analysis();
        }
        vec![Event::AnalysisProgressed {
            percent: self.analysis.percent(),
            tip_index: self.analysis.tip_index(),
            at: Utc::now(),
        }]
    }

    /// Skip the progress indicator and resolve immediately.
    pub fn finish_analysis(&mut self) -> Vec<Event> {
        if self.screen != Screen::Loading {
            return Vec::new();
        }
        self.complete_analysis()
    }

    /// Display a point and load its timer. The previous countdown, if any,
    /// is cancelled first.
    pub fn select_point(&mut self, point_id: &str) -> Result<Vec<Event>> {
        if !matches!(self.screen, Screen::Results | Screen::Guide) {
            return Err(self.wrong_screen("select point"));
        }
        let point = self.tracker.select_point(point_id)?;
        self.timer.load(point);
        let mut events = vec![Event::PointSelected {
            point_id: point.id.clone(),
            duration_secs: point.duration_secs,
            at: Utc::now(),
        }];
        events.extend(self.go(Screen::Guide));
        Ok(events)
    }

    pub fn start_timer(&mut self) -> Option<Event> {
        self.in_guide()?;
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.in_guide()?;
        self.timer.pause()
    }

    /// Start when stopped, pause when running.
    pub fn toggle_timer(&mut self) -> Option<Event> {
        self.in_guide()?;
        self.timer.toggle()
    }

    pub fn reset_timer(&mut self) -> Option<Event> {
        self.in_guide()?;
        self.timer.reset()
    }

    /// Deliver a tick from the tick source.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        self.in_guide()?;
        self.timer.on_tick(tick)
    }

    /// User confirms the current point as done.
    pub fn complete_point(&mut self) -> Option<Event> {
        self.in_guide()?;
        let point = self.tracker.current()?;
        self.tracker.mark_complete(&point.id);
        Some(Event::PointCompleted {
            point_id: point.id.clone(),
            completed_count: self.tracker.completed_count(),
            at: Utc::now(),
        })
    }

    /// Move to the next recommended point, or finish the session.
    pub fn next_point(&mut self) -> Result<Vec<Event>> {
        self.require(Screen::Guide, "next point")?;
        match self.tracker.advance() {
            Advance::Moved(point) => {
                self.timer.load(point);
                Ok(vec![Event::PointSelected {
                    point_id: point.id.clone(),
                    duration_secs: point.duration_secs,
                    at: Utc::now(),
                }])
            }
            Advance::Exhausted => {
                self.timer.unload();
                let mut events = vec![Event::SessionExhausted {
                    completed_count: self.tracker.completed_count(),
                    at: Utc::now(),
                }];
                events.extend(self.go(Screen::Completed));
                events.extend(self.record_today());
                Ok(events)
            }
        }
    }

    /// Discard the session and return to symptom selection.
    pub fn restart(&mut self) -> Vec<Event> {
        self.timer.unload();
        self.selection.clear();
        self.tracker.reset();
        self.analysis.restart();
        let mut events = vec![Event::SessionRestarted { at: Utc::now() }];
        events.extend(self.go(Screen::Selection));
        events
    }

    pub fn view_history(&mut self) -> Result<Vec<Event>> {
        if !matches!(self.screen, Screen::Selection | Screen::Completed) {
            return Err(self.wrong_screen("view history"));
        }
        Ok(self.go(Screen::History).into_iter().collect())
    }

    pub fn back(&mut self) -> Vec<Event> {
        let target = self.screen.back();
        self.go(target).into_iter().collect()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_analysis(&mut self) -> Vec<Event> {
        let recommended = resolve(self.catalog, &self.selection.ids());
        tracing::debug!(points = recommended.len(), "analysis complete");
        self.tracker.begin(recommended.clone());
        self.timer.unload();
        let mut events = vec![Event::AnalysisCompleted {
            recommended,
            at: Utc::now(),
        }];
        events.extend(self.go(Screen::Results));
        events
    }

    fn record_today(&mut self) -> Option<Event> {
        let date = self.today();
        let symptoms = self.selection.ids();
        let points = self.tracker.completed_ids();
        match self.history.record_session(date, &symptoms, &points) {
            Ok(record) => Some(Event::SessionRecorded {
                date: record.date,
                points_used: record.points_used,
                duration_secs: record.duration_secs,
                at: Utc::now(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, %date, "failed to record session");
                None
            }
        }
    }

    fn go(&mut self, to: Screen) -> Option<Event> {
        let from = self.screen;
        if from == to {
            return None;
        }
        if from == Screen::Guide {
            self.timer.halt();
        }
        self.screen = to;
        tracing::debug!(%from, %to, "screen changed");
        Some(Event::ScreenChanged {
            from,
            to,
            at: Utc::now(),
        })
    }

    fn in_guide(&self) -> Option<()> {
        (self.screen == Screen::Guide).then_some(())
    }

    fn require(&self, screen: Screen, intent: &str) -> Result<()> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(self.wrong_screen(intent))
        }
    }

    fn wrong_screen(&self, intent: &str) -> CoreError {
        ValidationError::WrongScreen {
            intent: intent.into(),
            screen: self.screen.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryBackend;
    use crate::selection::MAX_SELECTED_SYMPTOMS;
    use crate::timer::ManualTicks;

    type TestApp = GuideApp<'static, MemoryBackend, ManualTicks>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn app() -> TestApp {
        GuideApp::new(
            Catalog::builtin(),
            HistoryStore::new(MemoryBackend::new()),
            ManualTicks::new(),
            GuideSettings::default(),
        )
        .with_clock(today)
    }

    fn analysed(symptoms: &[&str]) -> TestApp {
        let mut app = app();
        for id in symptoms {
            app.toggle_symptom(id).unwrap();
        }
        app.analyze().unwrap();
        app.finish_analysis();
        app
    }

    fn run_timer_out(app: &mut TestApp) {
        app.start_timer().unwrap();
        while let Some(tick) = app.timer().ticks().fire() {
            app.on_tick(tick);
        }
    }

    #[test]
    fn toggling_unknown_symptom_is_not_found() {
        let mut app = app();
        assert!(app.toggle_symptom("hiccups").unwrap_err().is_not_found());
        assert!(app.selection().is_empty());
    }

    #[test]
    fn selection_caps_at_five() {
        let mut app = app();
        let ids: Vec<String> = app.catalog().symptoms().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            app.toggle_symptom(id).unwrap();
        }
        assert_eq!(app.selection().len(), 5);
        let sixth = app.toggle_symptom(&ids[5]).unwrap();
        assert!(matches!(sixth, Event::SymptomToggled { outcome: ToggleOutcome::Rejected, .. }));
    }

    #[test]
    fn stale_cap_in_config_file_does_not_raise_the_cap() {
        let config: Config = toml::from_str("[guide]\nmax_symptoms = 9\n").unwrap();
        let mut app = GuideApp::new(
            Catalog::builtin(),
            HistoryStore::new(MemoryBackend::new()),
            ManualTicks::new(),
            GuideSettings::from(&config),
        );
        let ids: Vec<String> = app.catalog().symptoms().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            app.toggle_symptom(id).unwrap();
        }
        assert_eq!(app.selection().len(), MAX_SELECTED_SYMPTOMS);
    }

    #[test]
    fn analyze_requires_a_symptom() {
        let mut app = app();
        assert!(matches!(
            app.analyze(),
            Err(CoreError::Validation(ValidationError::EmptyCollection(_)))
        ));
        assert_eq!(app.screen(), Screen::Selection);
    }

    #[test]
    fn loading_ticks_resolve_after_the_bar_fills() {
        let mut app = app();
        app.toggle_symptom("headache").unwrap();
        app.analyze().unwrap();
        assert_eq!(app.screen(), Screen::Loading);

        let mut steps = 0;
        while app.screen() == Screen::Loading {
            app.loading_tick();
            steps += 1;
        }
        assert_eq!(steps, 50);
        assert_eq!(app.screen(), Screen::Results);
        assert_eq!(app.tracker().recommended(), ["hegu", "yintang", "taiyang"]);
    }

    #[test]
    fn select_point_surfaces_not_found_and_stays_put() {
        let mut app = analysed(&["headache"]);
        assert!(app.select_point("nowhere").unwrap_err().is_not_found());
        assert_eq!(app.screen(), Screen::Results);
    }

    #[test]
    fn changing_point_cancels_the_running_countdown() {
        let mut app = analysed(&["headache"]);
        app.select_point("hegu").unwrap();
        app.start_timer().unwrap();
        let stale = app.timer().ticks().fire().unwrap();
        app.on_tick(stale);

        app.next_point().unwrap();
        assert_eq!(app.current_point().unwrap().id, "yintang");
        assert!(!app.timer().ticks().is_armed());
        assert!(app.on_tick(stale).is_none());
        assert_eq!(app.timer().timer().remaining_secs(), 45);
        assert_eq!(app.timer().timer().state(), TimerState::Idle);
    }

    #[test]
    fn leaving_the_guide_stops_ticking() {
        let mut app = analysed(&["stress"]);
        app.select_point("shenmen").unwrap();
        app.start_timer().unwrap();
        let armed = app.timer().ticks().fire().unwrap();

        app.back();
        assert_eq!(app.screen(), Screen::Results);
        assert!(!app.timer().ticks().is_armed());
        assert!(app.on_tick(armed).is_none());
        assert_eq!(app.timer().timer().remaining_secs(), 30);
    }

    #[test]
    fn expiry_does_not_mark_completion() {
        let mut app = analysed(&["insomnia"]);
        app.select_point("shenmen").unwrap();
        run_timer_out(&mut app);
        assert_eq!(app.timer().timer().state(), TimerState::Expired);
        assert_eq!(app.tracker().completed_count(), 0);

        app.complete_point().unwrap();
        assert!(app.tracker().is_completed("shenmen"));
    }

    #[test]
    fn skipping_without_completion_records_only_completed_points() {
        let mut app = analysed(&["bloating"]);
        app.select_point("tianshu").unwrap();
        app.complete_point().unwrap();
        app.next_point().unwrap();
        let events = app.next_point().unwrap();

        assert_eq!(app.screen(), Screen::Completed);
        assert!(events.iter().any(|e| matches!(e, Event::SessionRecorded { .. })));
        let records = app.history_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].points_used, ["tianshu"]);
        assert_eq!(records[0].duration_secs, 60);
        assert_eq!(app.share_message(), share_message(1));
    }

    #[test]
    fn full_session_records_today() {
        let mut app = analysed(&["headache", "stress"]);
        assert_eq!(
            app.tracker().recommended(),
            ["hegu", "yintang", "taiyang", "shenmen", "neiguan"]
        );

        app.select_point("hegu").unwrap();
        loop {
            run_timer_out(&mut app);
            app.complete_point().unwrap();
            let events = app.next_point().unwrap();
            if events.iter().any(|e| matches!(e, Event::SessionExhausted { .. })) {
                break;
            }
        }

        assert_eq!(app.screen(), Screen::Completed);
        assert_eq!(app.tracker().completed_count(), 5);
        assert_eq!(app.snapshot().progress.current_index, 5);

        let record = app.history().record_on(today()).unwrap();
        assert_eq!(record.points_used.len(), 5);
        assert_eq!(record.duration_secs, 300);
        assert_eq!(record.symptoms, ["headache", "stress"]);
        assert_eq!(app.history_stats().streak_days, 1);
    }

    #[test]
    fn restart_clears_the_session_but_keeps_history() {
        let mut app = analysed(&["bloating"]);
        app.select_point("tianshu").unwrap();
        app.complete_point().unwrap();
        app.next_point().unwrap();
        app.next_point().unwrap();
        assert_eq!(app.screen(), Screen::Completed);

        app.restart();
        let snapshot = app.snapshot();
        assert_eq!(snapshot.screen, Screen::Selection);
        assert!(snapshot.selected_symptoms.is_empty());
        assert!(snapshot.recommended.is_empty());
        assert!(snapshot.current_point.is_none());
        assert_eq!(snapshot.timer.state, TimerState::Idle);
        assert_eq!(app.history_stats().total_sessions, 1);
    }

    #[test]
    fn navigation_follows_the_screen_graph() {
        let mut app = app();
        app.view_history().unwrap();
        assert_eq!(app.screen(), Screen::History);
        app.back();
        assert_eq!(app.screen(), Screen::Selection);

        let mut app = analysed(&["heartburn"]);
        assert!(app.view_history().is_err());
        app.select_point("neiguan").unwrap();
        app.back();
        assert_eq!(app.screen(), Screen::Results);
        app.back();
        assert_eq!(app.screen(), Screen::Selection);
    }

    #[test]
    fn timer_intents_are_ignored_off_the_guide_screen() {
        let mut app = analysed(&["heartburn"]);
        assert!(app.start_timer().is_none());
        assert!(app.complete_point().is_none());
        assert!(app.next_point().is_err());
    }
}
