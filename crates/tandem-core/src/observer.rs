//! Diagnostics emitted while parsing input and running the engine.
//!
//! The engine never logs directly. Every noteworthy event is handed to an
//! [`Observer`] supplied by the caller, which keeps the computation itself
//! free of side effects. [`TracingObserver`] forwards to `tracing`, the
//! [`Recorder`] keeps everything in memory for tests and reports.

use std::cell::RefCell;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{EmployeeId, ProjectId};
use crate::parse::SkipReason;

/// Something worth telling the caller about. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The batch contained no assignments.
    EmptyInput,
    /// Open-ended assignments were closed at `today`.
    OpenEndsFilled { count: usize, today: NaiveDate },
    /// A project had fewer than two assignments and was not scanned.
    GroupSkipped { project: ProjectId, size: usize },
    /// A project group exceeded the configured size threshold.
    LargeGroup { project: ProjectId, size: usize },
    /// Two assignments of the same employee overlapped on one project.
    SelfPairSkipped {
        project: ProjectId,
        employee: EmployeeId,
    },
    /// An input row was dropped by the parser.
    RowSkipped { line: u64, reason: SkipReason },
    /// The parser accepted `count` rows.
    RowsParsed { count: usize },
    /// Final tally of an engine run.
    Summary { records: usize, pairs: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("empty assignment batch"),
            Self::OpenEndsFilled { count, today } => {
                write!(f, "{count} open-ended assignment(s) closed at {today}")
            }
            Self::GroupSkipped { project, size } => {
                write!(f, "project {project} skipped: {size} assignment(s)")
            }
            Self::LargeGroup { project, size } => {
                write!(f, "project {project} has {size} assignments (quadratic scan)")
            }
            Self::SelfPairSkipped { project, employee } => {
                write!(
                    f,
                    "employee {employee} has overlapping assignments on project {project}"
                )
            }
            Self::RowSkipped { line, reason } => write!(f, "line {line} skipped: {reason}"),
            Self::RowsParsed { count } => write!(f, "parsed {count} assignment record(s)"),
            Self::Summary { records, pairs } => {
                write!(f, "{records} collaboration record(s) across {pairs} pair(s)")
            }
        }
    }
}

/// Receiver for [`Diagnostic`]s.
pub trait Observer {
    fn notify(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at a level matching their weight.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::EmptyInput
            | Diagnostic::LargeGroup { .. }
            | Diagnostic::SelfPairSkipped { .. } => warn!("{diagnostic}"),
            Diagnostic::RowSkipped { reason, .. } if reason.is_routine() => {
                debug!("{diagnostic}");
            }
            Diagnostic::RowSkipped { .. } => warn!("{diagnostic}"),
            Diagnostic::GroupSkipped { .. } | Diagnostic::OpenEndsFilled { .. } => {
                debug!("{diagnostic}");
            }
            Diagnostic::RowsParsed { .. } | Diagnostic::Summary { .. } => info!("{diagnostic}"),
        }
    }
}

/// Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct Recorder {
    seen: RefCell<Vec<Diagnostic>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded diagnostics, leaving the recorder empty.
    #[must_use]
    pub fn take(&self) -> Vec<Diagnostic> {
        self.seen.take()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl Observer for Recorder {
    fn notify(&self, diagnostic: Diagnostic) {
        self.seen.borrow_mut().push(diagnostic);
    }
}

impl<O: Observer + ?Sized> Observer for &O {
    fn notify(&self, diagnostic: Diagnostic) {
        (**self).notify(diagnostic);
    }
}
