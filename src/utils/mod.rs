pub mod number;
pub mod payroll_csv;
pub mod timesheet_csv;
