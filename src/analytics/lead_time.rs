//! Lead time: days from creation to resolution.

use crate::issue::{elapsed_days, Issue};

/// Elapsed days between creation and resolution for each closed issue.
///
/// Issues missing either timestamp are skipped. Returns `None` when no
/// issue yields a value.
#[must_use]
pub fn lead_times(closed: &[&Issue]) -> Option<Vec<f64>> {
    let values: Vec<f64> = closed
        .iter()
        .filter_map(|issue| Some(elapsed_days(issue.created()?, issue.resolved()?)))
        .collect();

    if values.is_empty() {
        tracing::warn!("No lead-time data: no closed issue has both created and resolved dates");
        return None;
    }
    Some(values)
}
