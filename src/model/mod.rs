pub mod leave;
pub mod payroll;
pub mod status;
pub mod timesheet;
