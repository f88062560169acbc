//! Batch submission: validate, recalculate and persist a working set.
//!
//! The batch itself never fails. Each row ends up with its own status and the
//! caller gets the four counters back for the summary line.

use std::collections::HashMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::engine::calculator;
use crate::model::payroll::PayrollRecord;
use crate::model::status::{RecordError, RecordStatus};
use crate::sheet::{SheetRow, Worksheet};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Where accepted rows go. Rows that were never stored are inserted, all
/// others updated.
pub trait RecordWriter<R> {
    fn insert(&mut self, record: &R) -> Result<(), WriteError>;
    fn update(&mut self, record: &R) -> Result<(), WriteError>;
}

/// Writer that only records an audit line per accepted row.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuditLog;

impl<R: SheetRow> RecordWriter<R> for AuditLog {
    fn insert(&mut self, record: &R) -> Result<(), WriteError> {
        info!(kind = R::KIND, id = record.id(), "insert record");
        Ok(())
    }

    fn update(&mut self, record: &R) -> Result<(), WriteError> {
        info!(kind = R::KIND, id = record.id(), "update record");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, ToSchema)]
#[display(
    fmt = "Success: {}, Failed: {}, Unchanged: {}, Skipped: {}",
    success,
    failed,
    unchanged,
    skipped
)]
pub struct SubmitCounts {
    pub success: usize,
    pub failed: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl SubmitCounts {
    pub fn total(&self) -> usize {
        self.success + self.failed + self.unchanged + self.skipped
    }

    pub(crate) fn tally(&mut self, status: &RecordStatus, unchanged: bool) {
        match status {
            _ if unchanged => self.unchanged += 1,
            RecordStatus::Success => self.success += 1,
            RecordStatus::Skipped => self.skipped += 1,
            RecordStatus::Failed(_) => self.failed += 1,
            // submission never leaves a row in any other state
            _ => {}
        }
    }
}

/// Rows after a submission pass, same length and order as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<R> {
    pub records: Vec<R>,
    pub counts: SubmitCounts,
}

enum Verdict {
    Unchanged,
    Skip,
    Reject(RecordError),
    Accept,
}

/// How many times each id occurs in the batch.
pub(crate) fn id_occurrences<R: SheetRow>(records: &[R]) -> HashMap<u64, usize> {
    let mut seen = HashMap::with_capacity(records.len());
    for record in records {
        *seen.entry(record.id()).or_insert(0) += 1;
    }
    seen
}

fn classify(record: &PayrollRecord, ids: &HashMap<u64, usize>) -> Verdict {
    if record.status == RecordStatus::Loaded {
        return Verdict::Unchanged;
    }
    if record.is_blank() {
        return Verdict::Skip;
    }
    if record.is_missing_required() {
        return Verdict::Reject(RecordError::MissingRequiredField);
    }
    if ids.get(&record.id).copied().unwrap_or(0) > 1 {
        return Verdict::Reject(RecordError::DuplicateIdentifier);
    }
    Verdict::Accept
}

/// Hand an accepted row to the writer: insert when it was never stored,
/// update otherwise.
pub(crate) fn persist<R, W>(record: &R, was_pending: bool, writer: &mut W) -> Result<(), RecordError>
where
    R: SheetRow,
    W: RecordWriter<R>,
{
    let written = if was_pending { writer.insert(record) } else { writer.update(record) };
    written.map_err(|e| {
        warn!(kind = R::KIND, id = record.id(), error = %e, "record write failed");
        RecordError::CalculationFailure
    })
}

/// Submit a payroll working set.
///
/// Per row, in order: `Loaded` passes through; a fully blank row is
/// `Skipped`; a partially filled one fails with missing fields; an id that
/// occurs more than once fails every occurrence; anything else is
/// recalculated, written and marked `Success`.
#[instrument(name = "payroll_submit", skip_all, fields(rows = records.len()))]
pub fn submit_payroll<W>(records: &[PayrollRecord], writer: &mut W) -> BatchOutcome<PayrollRecord>
where
    W: RecordWriter<PayrollRecord>,
{
    let ids = id_occurrences(records);
    let mut counts = SubmitCounts::default();

    let records: Vec<PayrollRecord> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let out = match classify(record, &ids) {
                Verdict::Unchanged => {
                    counts.tally(&record.status, true);
                    return record.clone();
                }
                Verdict::Skip => PayrollRecord { status: RecordStatus::Skipped, ..record.clone() },
                Verdict::Reject(reason) => {
                    info!(row = index + 1, id = record.id, %reason, "payroll row rejected");
                    PayrollRecord { status: RecordStatus::Failed(reason), ..record.clone() }
                }
                Verdict::Accept => {
                    let calculated = calculator::calculate(record);
                    let was_pending = record.status == RecordStatus::Pending;
                    match persist(&calculated, was_pending, writer) {
                        Ok(()) => PayrollRecord { status: RecordStatus::Success, ..calculated },
                        Err(reason) => PayrollRecord { status: RecordStatus::Failed(reason), ..record.clone() },
                    }
                }
            };
            counts.tally(&out.status, false);
            out
        })
        .collect();

    info!(%counts, "payroll submission finished");
    BatchOutcome { records, counts }
}

impl Worksheet<PayrollRecord> {
    /// Submit the working set and make the result the new undo baseline.
    pub fn submit<W: RecordWriter<PayrollRecord>>(&mut self, writer: &mut W) -> SubmitCounts {
        let outcome = submit_payroll(self.rows(), writer);
        self.commit(outcome.records);
        outcome.counts
    }
}
