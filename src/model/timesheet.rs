use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::sheet::{CellValue, SheetError, SheetRow};
use crate::utils::number::lenient_f64;

/// Approval state picked on a timesheet row; `Saved` is set by submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
pub enum TimesheetStatus {
    #[default]
    Active,
    Pending,
    Approved,
    Rejected,
    Saved,
}

/// One employee's attendance for a day. Clock columns hold `HH:MM` or
/// `HH:MM:SS` text as typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[serde(default)]
    #[schema(example = "John Doe")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Monday")]
    pub day: String,

    #[serde(default)]
    #[schema(example = "2024-01-15", format = "date")]
    pub date: String,

    #[serde(default)]
    #[schema(example = "09:00:00")]
    pub check_in: String,

    #[serde(default)]
    #[schema(example = "17:30:00")]
    pub check_out: String,

    #[serde(default)]
    #[schema(example = "08:30:00")]
    pub total_hours: String,

    #[serde(default)]
    #[schema(example = "00:30:00")]
    pub overtime: String,

    #[serde(default)]
    #[schema(example = "00:15:00")]
    pub wasted_time: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub permission: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(example = 2.5)]
    pub mission: f64,

    /// days of leave booked against the entry
    #[serde(default, deserialize_with = "lenient_f64")]
    pub leave_type: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(example = 0.25)]
    pub delay: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(example = 15)]
    pub deduction: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(example = 50)]
    pub bonus: f64,

    #[serde(default)]
    #[schema(example = "Completed all assigned tasks efficiently")]
    pub notes: String,

    #[serde(default)]
    #[schema(value_type = String, example = "Active")]
    pub status: TimesheetStatus,
}

impl TimesheetRecord {
    pub fn text(&self, field: TimesheetField) -> Option<&str> {
        let text = match field {
            TimesheetField::Name => &self.name,
            TimesheetField::Day => &self.day,
            TimesheetField::Date => &self.date,
            TimesheetField::CheckIn => &self.check_in,
            TimesheetField::CheckOut => &self.check_out,
            TimesheetField::TotalHours => &self.total_hours,
            TimesheetField::Overtime => &self.overtime,
            TimesheetField::WastedTime => &self.wasted_time,
            TimesheetField::Notes => &self.notes,
            _ => return None,
        };
        Some(text)
    }

    fn text_mut(&mut self, field: TimesheetField) -> Option<&mut String> {
        let text = match field {
            TimesheetField::Name => &mut self.name,
            TimesheetField::Day => &mut self.day,
            TimesheetField::Date => &mut self.date,
            TimesheetField::CheckIn => &mut self.check_in,
            TimesheetField::CheckOut => &mut self.check_out,
            TimesheetField::TotalHours => &mut self.total_hours,
            TimesheetField::Overtime => &mut self.overtime,
            TimesheetField::WastedTime => &mut self.wasted_time,
            TimesheetField::Notes => &mut self.notes,
            _ => return None,
        };
        Some(text)
    }

    pub fn number(&self, field: TimesheetField) -> Option<f64> {
        match field {
            TimesheetField::Permission => Some(self.permission),
            TimesheetField::Mission => Some(self.mission),
            TimesheetField::LeaveType => Some(self.leave_type),
            TimesheetField::Delay => Some(self.delay),
            TimesheetField::Deduction => Some(self.deduction),
            TimesheetField::Bonus => Some(self.bonus),
            _ => None,
        }
    }

    fn number_mut(&mut self, field: TimesheetField) -> Option<&mut f64> {
        match field {
            TimesheetField::Permission => Some(&mut self.permission),
            TimesheetField::Mission => Some(&mut self.mission),
            TimesheetField::LeaveType => Some(&mut self.leave_type),
            TimesheetField::Delay => Some(&mut self.delay),
            TimesheetField::Deduction => Some(&mut self.deduction),
            TimesheetField::Bonus => Some(&mut self.bonus),
            _ => None,
        }
    }

    /// Bonus net of deduction for the day.
    pub fn pay(&self) -> f64 {
        self.bonus - self.deduction
    }

    pub fn is_checked_out(&self) -> bool {
        !self.check_out.trim().is_empty()
    }
}

/// Timesheet columns in export order, followed by the grid-only status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Serialize, Deserialize, ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum TimesheetField {
    Name,
    Day,
    Date,
    CheckIn,
    CheckOut,
    TotalHours,
    Overtime,
    WastedTime,
    Permission,
    Mission,
    LeaveType,
    Delay,
    Deduction,
    Bonus,
    Notes,
    Status,
}

impl TimesheetField {
    pub fn label(self) -> &'static str {
        match self {
            TimesheetField::Name => "Name",
            TimesheetField::Day => "Day",
            TimesheetField::Date => "Date",
            TimesheetField::CheckIn => "Check In",
            TimesheetField::CheckOut => "Check Out",
            TimesheetField::TotalHours => "Total Hours",
            TimesheetField::Overtime => "Overtime",
            TimesheetField::WastedTime => "Wasted Time",
            TimesheetField::Permission => "Permission",
            TimesheetField::Mission => "Mission",
            TimesheetField::LeaveType => "Leave Type",
            TimesheetField::Delay => "Delay",
            TimesheetField::Deduction => "Deduction",
            TimesheetField::Bonus => "Bonus",
            TimesheetField::Notes => "Notes",
            TimesheetField::Status => "Status",
        }
    }

    /// Columns holding clock text rather than numbers.
    pub fn is_clock(self) -> bool {
        matches!(
            self,
            TimesheetField::CheckIn
                | TimesheetField::CheckOut
                | TimesheetField::TotalHours
                | TimesheetField::Overtime
                | TimesheetField::WastedTime
        )
    }
}

impl SheetRow for TimesheetRecord {
    type Field = TimesheetField;

    const KIND: &'static str = "timesheet";

    fn id(&self) -> u64 {
        self.id
    }

    fn read(&self, field: TimesheetField) -> CellValue {
        if let Some(value) = self.number(field) {
            return CellValue::Number(value);
        }
        match self.text(field) {
            Some(text) => CellValue::Text(text.to_string()),
            None => CellValue::Text(self.status.to_string()),
        }
    }

    /// Edits leave the status alone; it only changes through its own column
    /// or a submit.
    fn write(&mut self, field: TimesheetField, value: &CellValue) -> Result<(), SheetError> {
        if field == TimesheetField::Status {
            let text = value.as_text();
            self.status = text.trim().parse().map_err(|_| SheetError::InvalidValue {
                field: field.as_ref().to_string(),
                value: text.clone(),
            })?;
            return Ok(());
        }
        if let Some(slot) = self.number_mut(field) {
            *slot = value.as_number();
        } else if let Some(slot) = self.text_mut(field) {
            *slot = value.as_text();
        }
        Ok(())
    }

    fn blank(id: u64, today: NaiveDate) -> Self {
        TimesheetRecord {
            id,
            date: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }
}
