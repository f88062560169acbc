//! Free-text search over the grids. Filters return the indices of matching
//! rows so edits keep addressing the full working set.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::leave::LeaveRecord;
use crate::model::payroll::PayrollRecord;
use crate::model::timesheet::TimesheetRecord;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalized(query: &Option<String>) -> Option<String> {
    query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct PayrollFilter {
    /// matches the employee name (any case), the id or the basic salary
    pub query: Option<String>,
    pub employee_id: Option<u64>,
    /// payment date or a prefix of it, e.g. `2024-01`
    pub date: Option<String>,
}

impl PayrollFilter {
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        if self.employee_id.is_some_and(|id| record.id != id) {
            return false;
        }
        if let Some(date) = self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            if !record.payment_date.contains(date) {
                return false;
            }
        }
        match normalized(&self.query) {
            Some(q) => {
                contains_ignore_case(&record.employee_name, &q)
                    || record.id.to_string().contains(&q)
                    || record.basic_salary.to_string().contains(&q)
            }
            None => true,
        }
    }

    pub fn apply(&self, records: &[PayrollRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    /// matches name, employee code, description or date
    pub query: Option<String>,
    pub employee_id: Option<String>,
}

impl LeaveFilter {
    pub fn matches(&self, record: &LeaveRecord) -> bool {
        if let Some(code) = self.employee_id.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !record.employee_id.eq_ignore_ascii_case(code) {
                return false;
            }
        }
        match normalized(&self.query) {
            Some(q) => [&record.employee_name, &record.employee_id, &record.description, &record.date]
                .into_iter()
                .any(|text| contains_ignore_case(text, &q)),
            None => true,
        }
    }

    pub fn apply(&self, records: &[LeaveRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct TimesheetFilter {
    /// matches name, day or notes
    pub query: Option<String>,
    /// focus on a single entry
    pub id: Option<u64>,
}

impl TimesheetFilter {
    pub fn matches(&self, record: &TimesheetRecord) -> bool {
        if self.id.is_some_and(|id| record.id != id) {
            return false;
        }
        match normalized(&self.query) {
            Some(q) => [&record.name, &record.day, &record.notes]
                .into_iter()
                .any(|text| contains_ignore_case(text, &q)),
            None => true,
        }
    }

    pub fn apply(&self, records: &[TimesheetRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}
