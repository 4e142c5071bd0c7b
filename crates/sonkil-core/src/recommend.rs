//! Symptom to point recommendation.

use indexmap::IndexSet;

use crate::catalog::Catalog;

/// Resolve selected symptoms into an ordered, duplicate-free list of point ids.
///
/// Symptoms are walked in the given order and each symptom's related points
/// in declared order; the first occurrence of a point wins its position.
/// Unknown symptom ids are skipped.
pub fn resolve<S: AsRef<str>>(catalog: &Catalog, selected: &[S]) -> Vec<String> {
    let mut points: IndexSet<&str> = IndexSet::new();
    for id in selected {
        match catalog.symptom(id.as_ref()) {
            Ok(symptom) => {
                points.extend(symptom.related_points.iter().map(String::as_str));
            }
            Err(_) => {
                tracing::debug!(symptom = id.as_ref(), "skipping unknown symptom");
            }
        }
    }
    points.into_iter().map(str::to_owned).collect()
}
