//! Partition tenures by project.

use std::collections::BTreeMap;

use crate::model::{ProjectId, Tenure};
use crate::observer::{Diagnostic, Observer};

/// Tenures keyed by project, iterated in [`ProjectId`] order.
///
/// Only groups that can contain a pair (two or more members) are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectGroups {
    groups: BTreeMap<ProjectId, Vec<Tenure>>,
}

impl ProjectGroups {
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, project: &ProjectId) -> Option<&[Tenure]> {
        self.groups.get(project).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectId, &[Tenure])> {
        self.groups.iter().map(|(id, members)| (id, members.as_slice()))
    }

    /// Size of the largest group, or 0 when there are none.
    #[must_use]
    pub fn largest(&self) -> usize {
        self.groups.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Group `tenures` by project, dropping groups with fewer than two members.
///
/// Each dropped group is reported as [`Diagnostic::GroupSkipped`]; each kept
/// group larger than `large_group_threshold` as [`Diagnostic::LargeGroup`].
pub fn group_by_project(
    tenures: Vec<Tenure>,
    large_group_threshold: Option<usize>,
    observer: &dyn Observer,
) -> ProjectGroups {
    let mut groups: BTreeMap<ProjectId, Vec<Tenure>> = BTreeMap::new();
    for tenure in tenures {
        groups.entry(tenure.project.clone()).or_default().push(tenure);
    }

    groups.retain(|project, members| {
        let size = members.len();
        if size < 2 {
            observer.notify(Diagnostic::GroupSkipped {
                project: project.clone(),
                size,
            });
            return false;
        }
        if large_group_threshold.is_some_and(|limit| size > limit) {
            observer.notify(Diagnostic::LargeGroup {
                project: project.clone(),
                size,
            });
        }
        true
    });

    ProjectGroups { groups }
}
