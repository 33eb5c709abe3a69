#![forbid(unsafe_code)]
//! tandem-core library.
//!
//! Given employee-to-project assignments, works out how many days each pair
//! of employees spent on the same project at the same time, summed across
//! projects, and which pair spent the longest.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums carrying an [`error::ErrorCode`];
//!   the engine itself is infallible.
//! - **Logging**: the engine reports through [`observer::Observer`];
//!   [`observer::TracingObserver`] forwards to `tracing`.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod observer;
pub mod parse;

pub use engine::{CollaborationReport, EngineOptions, OverlapStrategy, analyze};
pub use model::{
    Assignment, CollaborationRecord, CollaborationTotals, EmployeeId, EmployeePair, EndDate,
    LongestCollaboration, ProjectId,
};
