//! Engine output types: per-project records, per-pair totals, the winner.

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::{EmployeeId, EmployeePair, ProjectId};

/// One overlapping assignment pair within one project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CollaborationRecord {
    pub project: ProjectId,
    pub pair: EmployeePair,
    /// Inclusive day count, always at least 1.
    pub overlap_days: u64,
}

/// Sum of overlap days per pair across every shared project.
///
/// Backed by an ordered map so iteration (and therefore every rendering and
/// tie-break built on it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaborationTotals {
    by_pair: BTreeMap<EmployeePair, u64>,
}

impl CollaborationTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `days` to the running total for `pair`.
    pub fn add(&mut self, pair: EmployeePair, days: u64) {
        *self.by_pair.entry(pair).or_default() += days;
    }

    #[must_use]
    pub fn get(&self, pair: &EmployeePair) -> Option<u64> {
        self.by_pair.get(pair).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    /// Iterate in canonical pair order.
    pub fn iter(&self) -> impl Iterator<Item = (EmployeePair, u64)> + '_ {
        self.by_pair.iter().map(|(pair, total)| (*pair, *total))
    }

    /// All totals, largest first; equal totals keep canonical pair order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(EmployeePair, u64)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }
}

impl FromIterator<(EmployeePair, u64)> for CollaborationTotals {
    fn from_iter<I: IntoIterator<Item = (EmployeePair, u64)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (pair, days) in iter {
            totals.add(pair, days);
        }
        totals
    }
}

#[derive(Serialize)]
struct TotalRow {
    first: EmployeeId,
    second: EmployeeId,
    total_days: u64,
}

impl Serialize for CollaborationTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.by_pair.len()))?;
        for (pair, total_days) in self.iter() {
            seq.serialize_element(&TotalRow {
                first: pair.first(),
                second: pair.second(),
                total_days,
            })?;
        }
        seq.end()
    }
}

/// The pair with the greatest total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LongestCollaboration {
    pub pair: EmployeePair,
    pub total_days: u64,
}
