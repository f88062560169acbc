pub mod calculator;
pub mod leave;
pub mod stats;
pub mod submit;
pub mod timesheet;
