//! The overlap-and-aggregation pipeline.
//!
//! ```text
//! assignments ─ normalize ─> tenures ─ group_by_project ─> groups
//!     ─ aggregate ─> { records, totals } ─ select_longest ─> winner
//! ```
//!
//! Every stage is a pure function over owned or borrowed data; diagnostics
//! go to the [`Observer`] passed in. A run never fails: empty or degenerate
//! input produces an empty report.
//!
//! # Cost
//!
//! The overlap scan is quadratic in the size of each project group (see
//! [`overlap`]). `EngineOptions::large_group_threshold` lets the caller get
//! a [`Diagnostic::LargeGroup`] when a group crosses a size it cares about.

pub mod aggregate;
pub mod group;
pub mod normalize;
pub mod overlap;
pub mod select;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

pub use aggregate::{Collaborations, aggregate};
pub use group::{ProjectGroups, group_by_project};
pub use normalize::normalize;
pub use overlap::{OverlapStrategy, overlap_days, project_collaborations};
pub use select::{leaders, select_longest};

use crate::model::{Assignment, CollaborationRecord, CollaborationTotals, LongestCollaboration};
use crate::observer::{Diagnostic, Observer};

/// Knobs for one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Substituted for open end dates.
    pub today: NaiveDate,
    pub strategy: OverlapStrategy,
    /// Report project groups larger than this.
    pub large_group_threshold: Option<usize>,
}

impl EngineOptions {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            strategy: OverlapStrategy::default(),
            large_group_threshold: None,
        }
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: OverlapStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_large_group_threshold(mut self, threshold: Option<usize>) -> Self {
        self.large_group_threshold = threshold;
        self
    }
}

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollaborationReport {
    /// Per-project detail, ordered by project then pair.
    pub records: Vec<CollaborationRecord>,
    pub totals: CollaborationTotals,
    /// `None` means no collaboration was found.
    pub longest: Option<LongestCollaboration>,
}

impl CollaborationReport {
    #[must_use]
    pub const fn has_collaboration(&self) -> bool {
        self.longest.is_some()
    }
}

/// Normalize and group `assignments`, then build records and totals.
pub fn collaborations(
    assignments: &[Assignment],
    options: &EngineOptions,
    observer: &dyn Observer,
) -> Collaborations {
    if assignments.is_empty() {
        observer.notify(Diagnostic::EmptyInput);
        return Collaborations::default();
    }

    let open = normalize::open_count(assignments);
    if open > 0 {
        observer.notify(Diagnostic::OpenEndsFilled {
            count: open,
            today: options.today,
        });
    }

    let tenures = normalize(assignments, options.today);
    let groups = group_by_project(tenures, options.large_group_threshold, observer);
    aggregate(&groups, options.strategy, observer)
}

/// Pair totals only.
pub fn collaboration_totals(
    assignments: &[Assignment],
    options: &EngineOptions,
    observer: &dyn Observer,
) -> CollaborationTotals {
    collaborations(assignments, options, observer).totals
}

/// Per-project detail only.
pub fn collaboration_records(
    assignments: &[Assignment],
    options: &EngineOptions,
    observer: &dyn Observer,
) -> Vec<CollaborationRecord> {
    collaborations(assignments, options, observer).records
}

/// Run the full pipeline: detail, totals and the longest-collaborating pair.
#[instrument(skip_all, fields(assignments = assignments.len()))]
pub fn analyze(
    assignments: &[Assignment],
    options: &EngineOptions,
    observer: &dyn Observer,
) -> CollaborationReport {
    let Collaborations { records, totals } = collaborations(assignments, options, observer);
    let longest = select_longest(&totals);

    if !assignments.is_empty() {
        observer.notify(Diagnostic::Summary {
            records: records.len(),
            pairs: totals.len(),
        });
    }

    CollaborationReport {
        records,
        totals,
        longest,
    }
}
