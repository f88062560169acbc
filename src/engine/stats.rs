use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::calculator::round_money;
use crate::model::payroll::PayrollRecord;

/// Totals shown above the payroll grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollStats {
    pub employees: usize,
    pub total_gross: f64,
    pub total_net: f64,
    pub average_net: f64,
    pub total_deductions: f64,
    /// rows still waiting to be submitted (pending or modified)
    pub awaiting_submit: usize,
    pub failed: usize,
}

impl PayrollStats {
    pub fn from_records(records: &[PayrollRecord]) -> Self {
        let mut stats = records.iter().fold(PayrollStats::default(), |mut acc, record| {
            acc.employees += 1;
            acc.total_gross += record.gross_pay;
            acc.total_net += record.net_pay;
            acc.total_deductions += record.total_deductions;
            acc.awaiting_submit += usize::from(record.status.is_awaiting_submit());
            acc.failed += usize::from(record.status.is_failed());
            acc
        });

        if stats.employees > 0 {
            stats.average_net = round_money(stats.total_net / stats.employees as f64);
        }
        stats.total_gross = round_money(stats.total_gross);
        stats.total_net = round_money(stats.total_net);
        stats.total_deductions = round_money(stats.total_deductions);
        stats
    }
}
