use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::engine::submit::{BatchOutcome, RecordWriter, SubmitCounts, persist};
use crate::model::leave::{LeaveKind, LeaveRecord};
use crate::model::status::{RecordError, RecordStatus};
use crate::sheet::Worksheet;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeaveError {
    #[error("invalid leave balance for {field}: {value}")]
    InvalidBalance { field: &'static str, value: f64 },
}

fn validate(record: &LeaveRecord) -> Result<(), RecordError> {
    if record.employee_name.trim().is_empty() || record.date.trim().is_empty() {
        return Err(RecordError::MissingRequiredField);
    }
    if record.has_conflicting_kinds() {
        return Err(RecordError::ConflictingLeaveTypes);
    }
    Ok(())
}

/// Submit a leave working set. `Loaded` rows pass through, rows missing the
/// employee or date fail, everything else is written.
#[instrument(name = "leave_submit", skip_all, fields(rows = records.len()))]
pub fn submit_leave<W>(records: &[LeaveRecord], writer: &mut W) -> BatchOutcome<LeaveRecord>
where
    W: RecordWriter<LeaveRecord>,
{
    let mut counts = SubmitCounts::default();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if record.status == RecordStatus::Loaded {
            counts.tally(&record.status, true);
            out.push(record.clone());
            continue;
        }

        let was_pending = record.status == RecordStatus::Pending;
        let status = match validate(record).and_then(|()| persist(record, was_pending, writer)) {
            Ok(()) => RecordStatus::Success,
            Err(reason) => RecordStatus::Failed(reason),
        };
        counts.tally(&status, false);
        out.push(LeaveRecord { status, ..record.clone() });
    }

    info!(%counts, "leave submission finished");
    BatchOutcome { records: out, counts }
}

impl Worksheet<LeaveRecord> {
    pub fn submit<W: RecordWriter<LeaveRecord>>(&mut self, writer: &mut W) -> SubmitCounts {
        let outcome = submit_leave(self.rows(), writer);
        self.commit(outcome.records);
        outcome.counts
    }
}

/// A balance tracked in two columns (the leave sheet's primary and secondary
/// allowance).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct BalancePair {
    #[schema(example = 30)]
    pub primary: f64,
    #[schema(example = 25)]
    pub secondary: f64,
}

impl BalancePair {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }
}

/// Entitlements entered on the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveBalances {
    pub previous_year: BalancePair,
    pub entitled: BalancePair,
    #[schema(example = 5)]
    pub other_days_entitled: f64,
}

impl Default for LeaveBalances {
    fn default() -> Self {
        Self {
            previous_year: BalancePair::new(0.0, 0.0),
            entitled: BalancePair::new(30.0, 25.0),
            other_days_entitled: 5.0,
        }
    }
}

impl LeaveBalances {
    fn validate(&self) -> Result<(), LeaveError> {
        let fields = [
            ("previousYear.primary", self.previous_year.primary),
            ("previousYear.secondary", self.previous_year.secondary),
            ("entitled.primary", self.entitled.primary),
            ("entitled.secondary", self.entitled.secondary),
            ("otherDaysEntitled", self.other_days_entitled),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
            Some((field, value)) => Err(LeaveError::InvalidBalance { field, value }),
            None => Ok(()),
        }
    }

    pub fn total_entitled(&self) -> BalancePair {
        BalancePair {
            primary: self.previous_year.primary + self.entitled.primary + self.other_days_entitled,
            secondary: self.previous_year.secondary + self.entitled.secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSummary {
    pub total_entitled: BalancePair,
    /// days taken per leave kind
    pub consumed: BTreeMap<LeaveKind, u32>,
    pub total_consumed: u32,
    pub remaining: BalancePair,
}

/// Summarize consumption against entitlements, for one employee code or for
/// everyone when `employee_id` is `None`.
pub fn summarize(
    records: &[LeaveRecord],
    employee_id: Option<&str>,
    balances: &LeaveBalances,
) -> Result<LeaveSummary, LeaveError> {
    balances.validate()?;

    let mut consumed: BTreeMap<LeaveKind, u32> = LeaveKind::iter().map(|k| (k, 0)).collect();
    for record in records
        .iter()
        .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
    {
        for kind in LeaveKind::iter() {
            *consumed.entry(kind).or_insert(0) += record.days(kind);
        }
    }

    let total_consumed: u32 = consumed.values().sum();
    let total_entitled = balances.total_entitled();
    let used = f64::from(total_consumed);

    Ok(LeaveSummary {
        total_entitled,
        consumed,
        total_consumed,
        remaining: BalancePair {
            primary: total_entitled.primary - used,
            secondary: total_entitled.secondary - used,
        },
    })
}
