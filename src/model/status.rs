use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a record was rejected by a submission pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing required fields")]
    MissingRequiredField,

    #[error("Duplicate ID")]
    DuplicateIdentifier,

    /// The writer behind the submitter could not store the row.
    #[error("Database error")]
    CalculationFailure,

    #[error("Multiple leave types selected")]
    ConflictingLeaveTypes,

    /// Reason text carried over from an earlier export or client.
    #[error("{0}")]
    Other(String),
}

impl RecordError {
    fn from_reason(reason: &str) -> Self {
        match reason {
            "Missing required fields" => RecordError::MissingRequiredField,
            "Duplicate ID" => RecordError::DuplicateIdentifier,
            "Database error" => RecordError::CalculationFailure,
            "Multiple leave types selected" => RecordError::ConflictingLeaveTypes,
            other => RecordError::Other(other.to_string()),
        }
    }
}

/// Row lifecycle shared by the payroll and leave grids.
///
/// Serialized as its display string, e.g. `"Failed: Duplicate ID"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RecordStatus {
    Loaded,
    Modified,
    #[default]
    Pending,
    Success,
    Failed(RecordError),
    Skipped,
}

impl RecordStatus {
    /// Status after the user edits any cell of the row.
    ///
    /// Rows that were never stored stay `Pending` so the next submit inserts
    /// them; everything else is re-armed as `Modified`.
    pub fn after_edit(&self) -> RecordStatus {
        match self {
            RecordStatus::Pending => RecordStatus::Pending,
            _ => RecordStatus::Modified,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecordStatus::Failed(_))
    }

    /// Rows the next submit will act on.
    pub fn is_awaiting_submit(&self) -> bool {
        matches!(self, RecordStatus::Pending | RecordStatus::Modified)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Loaded => f.write_str("Loaded"),
            RecordStatus::Modified => f.write_str("Modified"),
            RecordStatus::Pending => f.write_str("Pending"),
            RecordStatus::Success => f.write_str("Success"),
            RecordStatus::Skipped => f.write_str("Skipped"),
            RecordStatus::Failed(RecordError::Other(reason)) if reason.is_empty() => {
                f.write_str("Failed")
            }
            RecordStatus::Failed(reason) => write!(f, "Failed: {}", reason),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown record status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for RecordStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "Loaded" => Ok(RecordStatus::Loaded),
            "Modified" => Ok(RecordStatus::Modified),
            "Pending" | "New" => Ok(RecordStatus::Pending),
            "Success" => Ok(RecordStatus::Success),
            "Skipped" => Ok(RecordStatus::Skipped),
            "Failed" => Ok(RecordStatus::Failed(RecordError::Other(String::new()))),
            _ => match s.strip_prefix("Failed:") {
                Some(reason) => Ok(RecordStatus::Failed(RecordError::from_reason(reason.trim()))),
                None => Err(UnknownStatus(s.to_string())),
            },
        }
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for RecordStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
