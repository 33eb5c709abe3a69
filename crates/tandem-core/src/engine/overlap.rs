//! Pairwise overlap detection within one project.
//!
//! # Strategies
//!
//! - [`OverlapStrategy::Pairwise`] examines every unordered pair of
//!   tenures: `k * (k - 1) / 2` comparisons for a group of `k`.
//! - [`OverlapStrategy::Sweep`] sorts the group by start date and, for each
//!   tenure, scans successors only until one starts after the current
//!   tenure ends. Every later successor starts even later, so the skipped
//!   pairs are exactly the disjoint ones. Worst case is still quadratic
//!   (everyone overlaps everyone), but sparse groups become near linear.
//!
//! Both strategies return identical records.

use serde::{Deserialize, Serialize};

use crate::model::{CollaborationRecord, EmployeePair, ProjectId, Tenure};
use crate::observer::{Diagnostic, Observer};

/// How a project group is scanned for overlapping pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStrategy {
    #[default]
    Pairwise,
    Sweep,
}

impl OverlapStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pairwise => "pairwise",
            Self::Sweep => "sweep",
        }
    }
}

impl std::str::FromStr for OverlapStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pairwise" => Ok(Self::Pairwise),
            "sweep" => Ok(Self::Sweep),
            other => Err(format!("unknown overlap strategy '{other}'")),
        }
    }
}

/// Inclusive number of days both tenures cover.
///
/// Returns `None` when the ranges are disjoint, or when the computed length
/// is not positive (an inverted range on either side).
#[must_use]
pub fn overlap_days(a: &Tenure, b: &Tenure) -> Option<u64> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    if start > end {
        return None;
    }
    let days = end.signed_duration_since(start).num_days() + 1;
    u64::try_from(days).ok().filter(|&d| d > 0)
}

/// All collaboration records for one project group, sorted.
///
/// Two tenures of the same employee never form a pair; when they overlap
/// the observer receives [`Diagnostic::SelfPairSkipped`].
pub fn project_collaborations(
    project: &ProjectId,
    members: &[Tenure],
    strategy: OverlapStrategy,
    observer: &dyn Observer,
) -> Vec<CollaborationRecord> {
    let mut records = Vec::new();
    let mut emit = |a: &Tenure, b: &Tenure| {
        let Some(days) = overlap_days(a, b) else {
            return;
        };
        match EmployeePair::new(a.employee, b.employee) {
            Some(pair) => records.push(CollaborationRecord {
                project: project.clone(),
                pair,
                overlap_days: days,
            }),
            None => observer.notify(Diagnostic::SelfPairSkipped {
                project: project.clone(),
                employee: a.employee,
            }),
        }
    };

    match strategy {
        OverlapStrategy::Pairwise => {
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    emit(a, b);
                }
            }
        }
        OverlapStrategy::Sweep => {
            let mut sorted: Vec<&Tenure> = members.iter().collect();
            sorted.sort_by_key(|t| (t.start, t.end));
            for (i, a) in sorted.iter().enumerate() {
                for b in &sorted[i + 1..] {
                    if b.start > a.end {
                        break;
                    }
                    emit(a, b);
                }
            }
        }
    }

    records.sort();
    records
}
