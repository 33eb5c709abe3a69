//! Fold per-project records into per-pair totals.

use serde::Serialize;
use tracing::instrument;

use super::group::ProjectGroups;
use super::overlap::{OverlapStrategy, project_collaborations};
use crate::model::{CollaborationRecord, CollaborationTotals};
use crate::observer::Observer;

/// Both views of one grouping: the per-project detail and the per-pair sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collaborations {
    /// Every overlapping pair, ordered by project then pair.
    pub records: Vec<CollaborationRecord>,
    pub totals: CollaborationTotals,
}

impl Collaborations {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scan every project group once, keeping each record and adding its days
/// to the pair's running total.
#[instrument(skip_all, fields(groups = groups.len(), strategy = strategy.as_str()))]
pub fn aggregate(
    groups: &ProjectGroups,
    strategy: OverlapStrategy,
    observer: &dyn Observer,
) -> Collaborations {
    let mut out = Collaborations::default();
    for (project, members) in groups.iter() {
        let records = project_collaborations(project, members, strategy, observer);
        for record in &records {
            out.totals.add(record.pair, record.overlap_days);
        }
        out.records.extend(records);
    }
    out
}
