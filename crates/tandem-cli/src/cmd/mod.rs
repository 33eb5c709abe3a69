pub mod analyze;
pub mod completions;
pub mod details;
pub mod input;
pub mod pairs;
