//! Employee-to-project assignments, before and after normalization.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Positive integer identifying an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EmployeeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Project identifier as found in the input: numeric or free-form.
///
/// Numeric ids sort before named ids, so any collection keyed by project
/// iterates in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Numeric(u64),
    Named(String),
}

impl ProjectId {
    /// Interpret a raw token. Returns `None` for a blank token.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(
            token
                .parse::<u64>()
                .map_or_else(|_| Self::Named(token.to_string()), Self::Numeric),
        )
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ProjectId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| Self::Named(value.to_string()))
    }
}

/// End of an assignment: a concrete day, or still ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndDate {
    On(NaiveDate),
    Open,
}

impl EndDate {
    /// Resolve to a concrete day, substituting `today` for an open end.
    #[must_use]
    pub const fn or_today(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::On(date) => date,
            Self::Open => today,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<NaiveDate> for EndDate {
    fn from(date: NaiveDate) -> Self {
        Self::On(date)
    }
}

impl From<Option<NaiveDate>> for EndDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Open, Self::On)
    }
}

/// One employee's tenure on one project, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub employee: EmployeeId,
    pub project: ProjectId,
    pub start: NaiveDate,
    pub end: EndDate,
}

impl Assignment {
    pub fn new(
        employee: impl Into<EmployeeId>,
        project: impl Into<ProjectId>,
        start: NaiveDate,
        end: impl Into<EndDate>,
    ) -> Self {
        Self {
            employee: employee.into(),
            project: project.into(),
            start,
            end: end.into(),
        }
    }
}

/// An assignment whose end is a concrete day.
///
/// `start <= end` is expected but not enforced; an inverted range simply
/// never overlaps anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tenure {
    pub employee: EmployeeId,
    pub project: ProjectId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Tenure {
    pub(crate) fn from_assignment(assignment: &Assignment, today: NaiveDate) -> Self {
        Self {
            employee: assignment.employee,
            project: assignment.project.clone(),
            start: assignment.start,
            end: assignment.end.or_today(today),
        }
    }
}
