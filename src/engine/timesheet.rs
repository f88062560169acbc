//! Timesheet footer totals, per-employee summary and submission.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::engine::submit::{BatchOutcome, RecordWriter, SubmitCounts, persist};
use crate::model::timesheet::{TimesheetField, TimesheetRecord, TimesheetStatus};
use crate::sheet::Worksheet;

/// Decimal hours in `HH:MM` or `HH:MM:SS` text; seconds are ignored.
/// Anything without a colon, or with unreadable parts, is `None`.
pub fn clock_hours(text: &str) -> Option<f64> {
    let mut parts = text.trim().split(':');
    let hours: f64 = parts.next()?.trim().parse().ok()?;
    let minutes: f64 = parts.next()?.trim().parse().ok()?;
    let total = hours + minutes / 60.0;
    total.is_finite().then_some(total)
}

/// Leading hour count of a clock value, `"08:30:00"` → 8.
fn whole_hours(text: &str) -> f64 {
    text.split(':')
        .next()
        .and_then(|h| h.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of one column: clock columns in decimal hours, numeric columns as
/// entered. Text columns sum to 0.
pub fn column_sum(records: &[TimesheetRecord], field: TimesheetField) -> f64 {
    records
        .iter()
        .map(|record| match record.number(field) {
            Some(value) => value,
            None if field.is_clock() => record.text(field).and_then(clock_hours).unwrap_or(0.0),
            None => 0.0,
        })
        .sum()
}

/// Overtime hours minus wasted hours across the sheet.
pub fn net_value(records: &[TimesheetRecord]) -> f64 {
    column_sum(records, TimesheetField::Overtime) - column_sum(records, TimesheetField::WastedTime)
}

/// The grid's footer: per-column totals and the net value row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetTotals {
    #[schema(example = 35.5)]
    pub total_hours: f64,
    #[schema(example = 3.5)]
    pub overtime: f64,
    #[schema(example = 2.25)]
    pub wasted_time: f64,
    pub permission: f64,
    pub mission: f64,
    pub leave_type: f64,
    pub delay: f64,
    pub deduction: f64,
    pub bonus: f64,
    /// overtime minus wasted time
    #[schema(example = 1.25)]
    pub net_value: f64,
}

impl TimesheetTotals {
    pub fn from_records(records: &[TimesheetRecord]) -> Self {
        let sum = |field| round2(column_sum(records, field));
        Self {
            total_hours: sum(TimesheetField::TotalHours),
            overtime: sum(TimesheetField::Overtime),
            wasted_time: sum(TimesheetField::WastedTime),
            permission: sum(TimesheetField::Permission),
            mission: sum(TimesheetField::Mission),
            leave_type: sum(TimesheetField::LeaveType),
            delay: sum(TimesheetField::Delay),
            deduction: sum(TimesheetField::Deduction),
            bonus: sum(TimesheetField::Bonus),
            net_value: round2(net_value(records)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWeek {
    #[schema(example = "John Doe")]
    pub employee_name: String,
    /// whole hours only, minutes are dropped per entry
    #[schema(example = 8)]
    pub total_hours: f64,
    pub overtime_hours: f64,
    /// bonuses net of deductions
    #[schema(example = 35)]
    pub total_pay: f64,
    /// entries with a check-out time
    #[schema(example = 1)]
    pub days_worked: usize,
}

/// One line per employee name, in order of first appearance.
pub fn weekly_summary(records: &[TimesheetRecord]) -> Vec<EmployeeWeek> {
    let mut weeks: Vec<EmployeeWeek> = Vec::new();
    for record in records {
        let index = match weeks.iter().position(|w| w.employee_name == record.name) {
            Some(index) => index,
            None => {
                weeks.push(EmployeeWeek {
                    employee_name: record.name.clone(),
                    total_hours: 0.0,
                    overtime_hours: 0.0,
                    total_pay: 0.0,
                    days_worked: 0,
                });
                weeks.len() - 1
            }
        };
        let week = &mut weeks[index];
        week.total_hours += whole_hours(&record.total_hours);
        week.overtime_hours += whole_hours(&record.overtime);
        week.total_pay = round2(week.total_pay + record.pay());
        week.days_worked += usize::from(record.is_checked_out());
    }
    weeks
}

/// Save every row. Rows the writer accepts become `Saved`; a rejected row
/// keeps its status and counts as failed.
#[instrument(name = "timesheet_submit", skip_all, fields(rows = records.len()))]
pub fn submit_timesheet<W>(records: &[TimesheetRecord], writer: &mut W) -> BatchOutcome<TimesheetRecord>
where
    W: RecordWriter<TimesheetRecord>,
{
    let mut counts = SubmitCounts::default();
    let records: Vec<TimesheetRecord> = records
        .iter()
        .map(|record| {
            let was_pending = record.status == TimesheetStatus::Pending;
            match persist(record, was_pending, writer) {
                Ok(()) => {
                    counts.success += 1;
                    TimesheetRecord { status: TimesheetStatus::Saved, ..record.clone() }
                }
                Err(_) => {
                    counts.failed += 1;
                    record.clone()
                }
            }
        })
        .collect();

    info!(%counts, "timesheet submission finished");
    BatchOutcome { records, counts }
}

impl Worksheet<TimesheetRecord> {
    /// Save the sheet and make the result the new undo baseline.
    pub fn submit<W: RecordWriter<TimesheetRecord>>(&mut self, writer: &mut W) -> SubmitCounts {
        let outcome = submit_timesheet(self.rows(), writer);
        self.commit(outcome.records);
        outcome.counts
    }
}
