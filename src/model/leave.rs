use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::model::status::RecordStatus;
use crate::sheet::{CellValue, SheetError, SheetRow};

/// Kind of day off booked on a leave row.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    AsRefStr,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveKind {
    Regular,
    Emergency,
    Sick,
    Deduction,
    Unpaid,
    Other,
}

/// One day-off entry. At most one of the six day counts is non-zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[schema(example = 2)]
    pub id: u64,

    #[serde(default)]
    #[schema(example = "Jane Smith")]
    pub employee_name: String,

    /// employee code, e.g. EMP002
    #[serde(default)]
    #[schema(example = "EMP002")]
    pub employee_id: String,

    #[serde(default)]
    #[schema(example = "Medical appointment")]
    pub description: String,

    #[serde(default)]
    #[schema(example = "Wednesday")]
    pub day: String,

    #[serde(default)]
    #[schema(example = "2024-01-17", format = "date")]
    pub date: String,

    #[serde(default)]
    pub regular: u32,
    #[serde(default)]
    pub emergency: u32,
    #[serde(default)]
    #[schema(example = 1)]
    pub sick: u32,
    #[serde(default)]
    pub deduction: u32,
    #[serde(default)]
    pub unpaid: u32,
    #[serde(default)]
    pub other: u32,

    #[serde(default)]
    #[schema(value_type = String, example = "Loaded")]
    pub status: RecordStatus,
}

impl LeaveRecord {
    pub fn days(&self, kind: LeaveKind) -> u32 {
        match kind {
            LeaveKind::Regular => self.regular,
            LeaveKind::Emergency => self.emergency,
            LeaveKind::Sick => self.sick,
            LeaveKind::Deduction => self.deduction,
            LeaveKind::Unpaid => self.unpaid,
            LeaveKind::Other => self.other,
        }
    }

    fn days_mut(&mut self, kind: LeaveKind) -> &mut u32 {
        match kind {
            LeaveKind::Regular => &mut self.regular,
            LeaveKind::Emergency => &mut self.emergency,
            LeaveKind::Sick => &mut self.sick,
            LeaveKind::Deduction => &mut self.deduction,
            LeaveKind::Unpaid => &mut self.unpaid,
            LeaveKind::Other => &mut self.other,
        }
    }

    /// Book `days` of `kind`, clearing every other kind.
    pub fn set_days(&mut self, kind: LeaveKind, days: u32) {
        self.select_kind(kind, 1.0);
        *self.days_mut(kind) = days;
    }

    /// Book `kind` for this row (clearing every other kind) when `value` is
    /// positive; otherwise clear only `kind`.
    pub fn select_kind(&mut self, kind: LeaveKind, value: f64) {
        if value > 0.0 {
            for other in LeaveKind::iter() {
                *self.days_mut(other) = u32::from(other == kind);
            }
        } else {
            *self.days_mut(kind) = 0;
        }
    }

    pub fn booked_kinds(&self) -> impl Iterator<Item = LeaveKind> + '_ {
        LeaveKind::iter().filter(|kind| self.days(*kind) > 0)
    }

    pub fn selected_kind(&self) -> Option<LeaveKind> {
        self.booked_kinds().next()
    }

    pub fn has_conflicting_kinds(&self) -> bool {
        self.booked_kinds().nth(1).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum LeaveField {
    EmployeeName,
    EmployeeId,
    Description,
    Day,
    Date,
    Regular,
    Emergency,
    Sick,
    Deduction,
    Unpaid,
    Other,
    Status,
}

impl LeaveField {
    pub fn kind(self) -> Option<LeaveKind> {
        match self {
            LeaveField::Regular => Some(LeaveKind::Regular),
            LeaveField::Emergency => Some(LeaveKind::Emergency),
            LeaveField::Sick => Some(LeaveKind::Sick),
            LeaveField::Deduction => Some(LeaveKind::Deduction),
            LeaveField::Unpaid => Some(LeaveKind::Unpaid),
            LeaveField::Other => Some(LeaveKind::Other),
            _ => None,
        }
    }
}

impl SheetRow for LeaveRecord {
    type Field = LeaveField;

    const KIND: &'static str = "leave";

    fn id(&self) -> u64 {
        self.id
    }


    fn read(&self, field: LeaveField) -> CellValue {
        if let Some(kind) = field.kind() {
            return CellValue::Number(f64::from(self.days(kind)));
        }
        let text = match field {
            LeaveField::EmployeeName => &self.employee_name,
            LeaveField::EmployeeId => &self.employee_id,
            LeaveField::Description => &self.description,
            LeaveField::Day => &self.day,
            LeaveField::Date => &self.date,
            _ => return CellValue::Text(self.status.to_string()),
        };
        CellValue::Text(text.clone())
    }

    fn write(&mut self, field: LeaveField, value: &CellValue) -> Result<(), SheetError> {
        match (field, field.kind()) {
            (_, Some(kind)) => self.select_kind(kind, value.as_number()),
            (LeaveField::EmployeeName, _) => self.employee_name = value.as_text(),
            (LeaveField::EmployeeId, _) => self.employee_id = value.as_text(),
            (LeaveField::Description, _) => self.description = value.as_text(),
            (LeaveField::Day, _) => self.day = value.as_text(),
            (LeaveField::Date, _) => self.date = value.as_text(),
            _ => return Err(SheetError::ReadOnlyField(field.as_ref().to_string())),
        }
        self.status = self.status.after_edit();
        Ok(())
    }

    fn blank(id: u64, today: NaiveDate) -> Self {
        LeaveRecord {
            id,
            date: today.format("%Y-%m-%d").to_string(),
            status: RecordStatus::Pending,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded_sick_day() -> LeaveRecord {
        LeaveRecord {
            id: 2,
            employee_name: "Jane Smith".into(),
            employee_id: "EMP002".into(),
            date: "2024-01-17".into(),
            sick: 1,
            status: RecordStatus::Loaded,
            ..Default::default()
        }
    }

    #[test]
    fn selecting_a_kind_clears_the_others() {
        let mut record = loaded_sick_day();
        record.select_kind(LeaveKind::Emergency, 3.0);

        assert_eq!(record.emergency, 1);
        assert_eq!(record.sick, 0);
        assert_eq!(record.selected_kind(), Some(LeaveKind::Emergency));
        assert!(!record.has_conflicting_kinds());
    }

    #[test]
    fn deselecting_clears_only_that_kind() {
        let mut record = loaded_sick_day();
        record.select_kind(LeaveKind::Regular, 0.0);
        assert_eq!(record.sick, 1);

        record.select_kind(LeaveKind::Sick, 0.0);
        assert_eq!(record.selected_kind(), None);
    }

    #[test]
    fn grid_edit_enforces_exclusivity_and_marks_modified() {
        let mut record = loaded_sick_day();
        record.write(LeaveField::Unpaid, &"1".into()).unwrap();

        assert_eq!(record.booked_kinds().collect::<Vec<_>>(), vec![LeaveKind::Unpaid]);
        assert_eq!(record.status, RecordStatus::Modified);
    }

    #[test]
    fn status_column_is_read_only() {
        let mut record = loaded_sick_day();
        let err = record.write(LeaveField::Status, &"Success".into()).unwrap_err();
        assert_eq!(err, SheetError::ReadOnlyField("status".into()));
    }

    #[test]
    fn conflicting_input_is_detected() {
        let record = LeaveRecord { regular: 1, other: 2, ..Default::default() };
        assert!(record.has_conflicting_kinds());
    }

    #[test]
    fn kind_names_are_lowercase() {
        assert_eq!(LeaveKind::Emergency.to_string(), "emergency");
        assert_eq!("unpaid".parse::<LeaveKind>().unwrap(), LeaveKind::Unpaid);
    }
}
