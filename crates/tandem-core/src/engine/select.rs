//! Pick the pair with the greatest total.

use crate::model::{CollaborationTotals, EmployeePair, LongestCollaboration};

/// The pair with the greatest total, or `None` when there are no totals.
///
/// Ties go to the smallest canonical pair: totals iterate in pair order and
/// a later pair only replaces the current best when strictly greater.
#[must_use]
pub fn select_longest(totals: &CollaborationTotals) -> Option<LongestCollaboration> {
    totals.iter().fold(None, |best, (pair, total_days)| match best {
        Some(current) if current.total_days >= total_days => Some(current),
        _ => Some(LongestCollaboration { pair, total_days }),
    })
}

/// Every pair sharing the greatest total, in canonical order.
#[must_use]
pub fn leaders(totals: &CollaborationTotals) -> Vec<EmployeePair> {
    let Some(best) = select_longest(totals) else {
        return Vec::new();
    };
    totals
        .iter()
        .filter(|&(_, total)| total == best.total_days)
        .map(|(pair, _)| pair)
        .collect()
}
