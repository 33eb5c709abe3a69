pub mod assignment;
pub mod collaboration;
pub mod pair;

pub use assignment::{Assignment, EmployeeId, EndDate, ProjectId, Tenure};
pub use collaboration::{CollaborationRecord, CollaborationTotals, LongestCollaboration};
pub use pair::EmployeePair;
