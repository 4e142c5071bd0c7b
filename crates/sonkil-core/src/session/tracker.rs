//! Progress through one recommended point sequence.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{AcupressurePoint, Catalog};
use crate::error::Result;

/// Outcome of [`SessionTracker::advance`].
#[derive(Debug, Clone, Copy)]
pub enum Advance<'c> {
    /// The next recommended point is now current.
    Moved(&'c AcupressurePoint),
    /// No further points; the session is over.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    /// Index of the current point in the recommendation list; equals the
    /// list length once the session is exhausted.
    pub current_index: usize,
    pub total: usize,
    /// Completed point ids in completion order.
    pub completed_point_ids: Vec<String>,
}

/// Tracks the recommended points, the displayed point and completions.
#[derive(Debug, Clone)]
pub struct SessionTracker<'c> {
    catalog: &'c Catalog,
    recommended: Vec<String>,
    current: Option<&'c AcupressurePoint>,
    completed: IndexSet<String>,
    exhausted: bool,
}

impl<'c> SessionTracker<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            recommended: Vec::new(),
            current: None,
            completed: IndexSet::new(),
            exhausted: false,
        }
    }

    /// Start a new analysis cycle with a freshly resolved list.
    pub fn begin(&mut self, recommended: Vec<String>) {
        self.reset();
        self.recommended = recommended;
    }

    pub fn recommended(&self) -> &[String] {
        &self.recommended
    }

    pub fn current(&self) -> Option<&'c AcupressurePoint> {
        self.current
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Display the given point. The id must exist in the catalog but need
    /// not be part of the recommendation list.
    pub fn select_point(&mut self, point_id: &str) -> Result<&'c AcupressurePoint> {
        let point = self.catalog.point(point_id)?;
        self.current = Some(point);
        self.exhausted = false;
        Ok(point)
    }

    /// Record the point as completed. Idempotent.
    pub fn mark_complete(&mut self, point_id: &str) -> bool {
        self.completed.insert(point_id.to_owned())
    }

    pub fn is_completed(&self, point_id: &str) -> bool {
        self.completed.contains(point_id)
    }

    pub fn completed_ids(&self) -> Vec<String> {
        self.completed.iter().cloned().collect()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Move to the point after the current one in recommendation order.
    ///
    /// A current point outside the list (or none at all) advances to the
    /// first entry. Ids missing from the catalog are skipped. Past the last
    /// resolvable entry the tracker reports `Exhausted` and never wraps.
    pub fn advance(&mut self) -> Advance<'c> {
        let start = match self.current_position() {
            Some(index) => index + 1,
            None if self.exhausted => self.recommended.len(),
            None => 0,
        };
        for id in self.recommended.iter().skip(start) {
            match self.catalog.point(id) {
                Ok(point) => {
                    self.current = Some(point);
                    return Advance::Moved(point);
                }
                Err(e) => tracing::debug!(point = %id, error = %e, "skipping unresolved point"),
            }
        }
        self.exhausted = true;
        Advance::Exhausted
    }

    pub fn progress(&self) -> SessionProgress {
        let current_index = if self.exhausted {
            self.recommended.len()
        } else {
            self.current_position().unwrap_or(0)
        };
        SessionProgress {
            current_index,
            total: self.recommended.len(),
            completed_point_ids: self.completed_ids(),
        }
    }

    pub fn reset(&mut self) {
        self.recommended.clear();
        self.current = None;
        self.completed.clear();
        self.exhausted = false;
    }

    fn current_position(&self) -> Option<usize> {
        let current = self.current?;
        self.recommended.iter().position(|id| *id == current.id)
    }
}
