use chrono::NaiveDate;

use crate::error::Result;

use super::{
    compute_streak, month_calendar, recent_records, total_sessions, HistoryBackend,
    HistoryRecord, HistoryStats, MonthCalendar, HISTORY_KEY,
};

/// History persistence over an injected backend.
///
/// Reads fail soft: a missing or undecodable entry is an empty history.
/// Writes are read-modify-write of the whole sequence.
#[derive(Debug)]
pub struct HistoryStore<B: HistoryBackend> {
    backend: B,
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Store over `backend`, always under [`HISTORY_KEY`].
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All persisted records in stored order.
    pub fn load_all(&self) -> Vec<HistoryRecord> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(key = HISTORY_KEY, error = %e, "history storage unavailable");
            Vec::new()
        })
    }

    /// Record a completed session for `date`, replacing any record already
    /// stored for that date in place.
    ///
    /// An undecodable stored value is replaced. A backend that cannot be
    /// read is never overwritten.
    ///
    /// # Errors
    /// Returns an error if the stored history cannot be read, or if the
    /// updated history cannot be encoded or saved.
    pub fn record_session(
        &mut self,
        date: NaiveDate,
        symptoms: &[String],
        points_used: &[String],
    ) -> Result<HistoryRecord> {
        let record = HistoryRecord::completed(date, symptoms, points_used);
        let mut records = self.read()?;
        match records.iter_mut().find(|r| r.date == date) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        let encoded = serde_json::to_string(&records)?;
        self.backend.save(HISTORY_KEY, &encoded)?;
        tracing::debug!(%date, points = record.points_used.len(), "session recorded");
        Ok(record)
    }

    /// Backend failures propagate; a missing or undecodable value is empty.
    fn read(&self) -> Result<Vec<HistoryRecord>> {
        let Some(raw) = self.backend.load(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = HISTORY_KEY, error = %e, "discarding undecodable history");
                Ok(Vec::new())
            }
        }
    }

    pub fn total_sessions(&self) -> usize {
        total_sessions(&self.load_all())
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        compute_streak(&self.load_all(), today)
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryRecord> {
        recent_records(&self.load_all(), limit)
    }

    /// The completed record for `date`, if any.
    pub fn record_on(&self, date: NaiveDate) -> Option<HistoryRecord> {
        self.load_all()
            .into_iter()
            .find(|r| r.date == date && r.completed)
    }

    pub fn stats(&self, today: NaiveDate) -> HistoryStats {
        let records = self.load_all();
        HistoryStats {
            total_sessions: total_sessions(&records),
            streak_days: compute_streak(&records, today),
            last_session: records
                .iter()
                .filter(|r| r.completed)
                .map(|r| r.date)
                .max(),
        }
    }

    pub fn month_calendar(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthCalendar> {
        month_calendar(&self.load_all(), year, month, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StorageError};
    use crate::history::MemoryBackend;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct BrokenBackend;

    impl HistoryBackend for BrokenBackend {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(StorageError::Unavailable("disk on fire".into()).into())
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::Unavailable("disk on fire".into()).into())
        }
    }

    #[test]
    fn missing_entry_is_empty_history() {
        let store = HistoryStore::new(MemoryBackend::new());
        assert!(store.load_all().is_empty());
        assert_eq!(store.total_sessions(), 0);
    }

    #[test]
    fn malformed_json_is_empty_history_and_next_write_repairs_it() {
        let mut store = HistoryStore::new(MemoryBackend::with_entry(HISTORY_KEY, "{not json"));
        assert!(store.load_all().is_empty());

        store
            .record_session(day("2024-03-10"), &strings(&["stress"]), &strings(&["shenmen"]))
            .unwrap();
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn same_day_recording_replaces_in_place() {
        let mut store = HistoryStore::new(MemoryBackend::new());
        store
            .record_session(day("2024-03-09"), &strings(&["bloating"]), &strings(&["tianshu"]))
            .unwrap();
        store
            .record_session(day("2024-03-10"), &strings(&["headache"]), &strings(&["hegu"]))
            .unwrap();
        store
            .record_session(
                day("2024-03-10"),
                &strings(&["stress"]),
                &strings(&["shenmen", "yintang", "neiguan"]),
            )
            .unwrap();

        let records = store.load_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, day("2024-03-09"));
        assert_eq!(records[1].date, day("2024-03-10"));
        assert_eq!(records[1].symptoms, ["stress"]);
        assert_eq!(records[1].points_used.len(), 3);
        assert_eq!(records[1].duration_secs, 180);
    }

    #[test]
    fn persisted_value_uses_the_fixed_key_and_wire_names() {
        let mut store = HistoryStore::new(MemoryBackend::new());
        store
            .record_session(day("2024-03-10"), &strings(&["headache"]), &strings(&["hegu"]))
            .unwrap();
        let raw = store.backend().get(HISTORY_KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "date": "2024-03-10",
                "symptoms": ["headache"],
                "pointsUsed": ["hegu"],
                "duration": 60,
                "completed": true
            }])
        );
    }

    #[test]
    fn unavailable_backend_reads_empty_and_reports_write_failure() {
        let mut store = HistoryStore::new(BrokenBackend);
        assert!(store.load_all().is_empty());
        let err = store
            .record_session(day("2024-03-10"), &[], &[])
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Unavailable(_))));
    }

    /// Reads fail until `healthy` is set; saves always land in `inner`.
    struct FlakyBackend {
        inner: MemoryBackend,
        healthy: bool,
    }

    impl HistoryBackend for FlakyBackend {
        fn load(&self, key: &str) -> Result<Option<String>> {
            if self.healthy {
                self.inner.load(key)
            } else {
                Err(StorageError::Locked.into())
            }
        }

        fn save(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner.save(key, value)
        }
    }

    #[test]
    fn unreadable_backend_is_never_overwritten() {
        let mut seeded = HistoryStore::new(MemoryBackend::new());
        for date in ["2024-03-08", "2024-03-09"] {
            seeded
                .record_session(day(date), &strings(&["fatigue"]), &strings(&["baihui"]))
                .unwrap();
        }
        let mut store = HistoryStore::new(FlakyBackend {
            inner: seeded.backend().clone(),
            healthy: false,
        });

        assert!(store.load_all().is_empty());
        let err = store
            .record_session(day("2024-03-10"), &strings(&["stress"]), &strings(&["shenmen"]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Locked)));

        store.backend.healthy = true;
        let records = store.load_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, day("2024-03-09"));
    }

    #[test]
    fn stats_and_lookup() {
        let mut store = HistoryStore::new(MemoryBackend::new());
        for date in ["2024-03-08", "2024-03-09", "2024-03-10"] {
            store
                .record_session(day(date), &strings(&["fatigue"]), &strings(&["baihui"]))
                .unwrap();
        }
        let stats = store.stats(day("2024-03-10"));
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.streak_days, 3);
        assert_eq!(stats.last_session, Some(day("2024-03-10")));
        assert!(store.record_on(day("2024-03-09")).is_some());
        assert!(store.record_on(day("2024-03-01")).is_none());
        assert_eq!(store.recent(2).len(), 2);
    }
}
