//! Timesheet grid CSV export.

use chrono::NaiveDate;
use csv::WriterBuilder;
use strum::IntoEnumIterator;

use crate::model::timesheet::{TimesheetField, TimesheetRecord};
use crate::sheet::SheetRow;
use crate::utils::payroll_csv::CsvError;

pub fn export_file_name(date: NaiveDate) -> String {
    format!("timesheet-data-{}.csv", date.format("%Y-%m-%d"))
}

fn exported_columns() -> impl Iterator<Item = TimesheetField> {
    TimesheetField::iter().filter(|field| *field != TimesheetField::Status)
}

/// Name through notes, one line per entry. Status stays in the grid.
pub fn export_timesheet_csv(records: &[TimesheetRecord]) -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(exported_columns().map(TimesheetField::label))?;
    for record in records {
        writer.write_record(exported_columns().map(|field| record.read(field).as_text()))?;
    }
    let bytes = writer.into_inner().map_err(|e| CsvError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Output(e.to_string()))
}
