//! Close open-ended assignments at a reference date.

use chrono::NaiveDate;

use crate::model::{Assignment, Tenure};

/// Turn every assignment into a [`Tenure`] with a concrete end.
///
/// Open ends become `today`; concrete ends pass through. If `today` falls
/// before an assignment's start the resulting range is inverted, which is
/// allowed and simply never overlaps anything.
#[must_use]
pub fn normalize(assignments: &[Assignment], today: NaiveDate) -> Vec<Tenure> {
    assignments
        .iter()
        .map(|a| Tenure::from_assignment(a, today))
        .collect()
}

/// Number of assignments that will be closed at `today`.
#[must_use]
pub fn open_count(assignments: &[Assignment]) -> usize {
    assignments.iter().filter(|a| a.end.is_open()).count()
}
