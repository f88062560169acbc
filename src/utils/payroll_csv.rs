//! Payroll grid CSV export and import.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, info};

use crate::engine::calculator::calculate;
use crate::model::payroll::{PayrollField, PayrollRecord};
use crate::model::status::RecordStatus;
use crate::sheet::SheetRow;
use crate::utils::number::{MAX_ID, parse_amount, parse_count, parse_id};

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("malformed csv: {0}")]
    Malformed(#[from] csv::Error),

    #[error("no recognised payroll columns in header")]
    UnknownHeaders,

    #[error("no payroll rows found in file")]
    NoRows,

    #[error("failed to finish csv output: {0}")]
    Output(String),
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("payroll-data-{}.csv", date.format("%Y-%m-%d"))
}

/// Header row plus one line per record, derived fields and status as stored.
pub fn export_payroll_csv(records: &[PayrollRecord]) -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(PayrollField::iter().map(PayrollField::label))?;
    for record in records {
        writer.write_record(PayrollField::iter().map(|field| record.read(field).as_text()))?;
    }
    let bytes = writer.into_inner().map_err(|e| CsvError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Output(e.to_string()))
}

/// Parse CSV text into `Pending`, recalculated rows.
///
/// Rows without a usable id are numbered from `next_id` upwards, skipping any
/// id already taken further up the file.
pub fn import_payroll_csv(
    text: &str,
    next_id: u64,
    today: NaiveDate,
) -> Result<Vec<PayrollRecord>, CsvError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<Option<PayrollField>> =
        reader.headers()?.iter().map(PayrollField::from_header).collect();
    if columns.iter().all(Option::is_none) {
        return Err(CsvError::UnknownHeaders);
    }

    let mut fallback_id = next_id.clamp(1, MAX_ID);
    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() < columns.len() {
            debug!(line = line + 2, values = row.len(), "short csv row skipped");
            continue;
        }

        let mut record = read_row(&columns, &row);
        match explicit_id(&columns, &row) {
            Some(id) => {
                record.id = id;
                fallback_id = fallback_id.max(id.saturating_add(1));
            }
            None => {
                record.id = fallback_id;
                fallback_id = fallback_id.saturating_add(1);
            }
        }
        if record.payment_date.is_empty() {
            record.payment_date = today.format("%Y-%m-%d").to_string();
        }
        records.push(calculate(&record));
    }

    if records.is_empty() {
        return Err(CsvError::NoRows);
    }
    info!(rows = records.len(), "payroll csv imported");
    Ok(records)
}

fn explicit_id(columns: &[Option<PayrollField>], row: &StringRecord) -> Option<u64> {
    let position = columns.iter().position(|c| *c == Some(PayrollField::Id))?;
    parse_id(parse_amount(row.get(position)?))
}

fn read_row(columns: &[Option<PayrollField>], row: &StringRecord) -> PayrollRecord {
    let mut record = PayrollRecord { status: RecordStatus::Pending, ..Default::default() };
    for (field, value) in columns.iter().zip(row.iter()) {
        let Some(field) = *field else { continue };
        if !field.is_editable() || field == PayrollField::Id {
            continue;
        }
        let value = value.trim_matches('"');
        match field {
            PayrollField::EmployeeName => record.employee_name = value.to_string(),
            PayrollField::PaymentDate => record.payment_date = value.to_string(),
            numeric => {
                let parsed = if numeric.is_count() { parse_count(value) } else { parse_amount(value) };
                if let Some(slot) = record.number_mut(numeric) {
                    *slot = parsed;
                }
            }
        }
    }
    record
}
