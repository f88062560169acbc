//! Demo datasets served by the `sample` endpoints.

use crate::engine::calculator::calculate;
use crate::model::leave::{LeaveKind, LeaveRecord};
use crate::model::payroll::PayrollRecord;
use crate::model::status::RecordStatus;
use crate::model::timesheet::TimesheetRecord;

const SAMPLE_PAY_DATE: &str = "2024-01-15";

// id, name, basic, incentive, special bonus, bonuses, trips, ot hours,
// social insurance, advances, transportation, deductions
type PayrollSeed = (u64, &'static str, f64, f64, f64, f64, f64, f64, f64, f64, f64, f64);

const PAYROLL_SEED: [PayrollSeed; 7] = [
    (1, "John Doe", 75000.0, 5000.0, 2000.0, 2.0, 1.0, 10.0, 1500.0, 1000.0, 500.0, 1.0),
    (2, "Jane Smith", 85000.0, 6000.0, 3000.0, 1.0, 2.0, 8.0, 1700.0, 1200.0, 600.0, 0.0),
    (3, "Ahmed Hassan", 65000.0, 4000.0, 1500.0, 3.0, 0.0, 15.0, 1300.0, 800.0, 400.0, 2.0),
    (4, "Sarah Johnson", 90000.0, 7000.0, 4000.0, 1.0, 3.0, 5.0, 1800.0, 1500.0, 700.0, 1.0),
    (5, "Mohamed Ali", 70000.0, 3500.0, 1000.0, 2.0, 1.0, 12.0, 1400.0, 900.0, 450.0, 3.0),
    (6, "Lisa Chen", 80000.0, 5500.0, 2500.0, 1.0, 2.0, 6.0, 1600.0, 1100.0, 550.0, 0.0),
    (7, "Omar Khalil", 60000.0, 3000.0, 800.0, 4.0, 0.0, 20.0, 1200.0, 600.0, 300.0, 2.0),
];

/// Seven calculated payroll rows, all `Loaded`.
pub fn sample_payroll() -> Vec<PayrollRecord> {
    PAYROLL_SEED
        .iter()
        .map(|&(id, name, basic, incentive, special, bonuses, trips, ot, social, advances, transport, deductions)| {
            calculate(&PayrollRecord {
                id,
                employee_name: name.to_string(),
                payment_date: SAMPLE_PAY_DATE.to_string(),
                basic_salary: basic,
                incentive,
                special_bonus: special,
                number_of_bonuses: bonuses,
                number_of_business_trips: trips,
                ot_hours: ot,
                social_insurance: social,
                advances,
                transportation_deductions: transport,
                number_of_deductions: deductions,
                status: RecordStatus::Loaded,
                ..Default::default()
            })
        })
        .collect()
}

/// Three leave rows, one booked kind each, all `Loaded`.
pub fn sample_leave() -> Vec<LeaveRecord> {
    let seed = [
        (1, "John Doe", "EMP001", "Annual vacation", "Monday", "2024-01-15", LeaveKind::Regular, 5),
        (2, "Jane Smith", "EMP002", "Medical appointment", "Wednesday", "2024-01-17", LeaveKind::Sick, 1),
        (3, "Ahmed Hassan", "EMP003", "Family emergency", "Friday", "2024-01-19", LeaveKind::Emergency, 2),
    ];

    seed.into_iter()
        .map(|(id, name, code, description, day, date, kind, days)| {
            let mut record = LeaveRecord {
                id,
                employee_name: name.to_string(),
                employee_id: code.to_string(),
                description: description.to_string(),
                day: day.to_string(),
                date: date.to_string(),
                status: RecordStatus::Loaded,
                ..Default::default()
            };
            record.set_days(kind, days);
            record
        })
        .collect()
}

// id, name, check in, check out, total, overtime, wasted, permission,
// mission, leave, delay, deduction, bonus, notes
type TimesheetSeed = (
    u64,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    f64,
    f64,
    f64,
    f64,
    &'static str,
);

const TIMESHEET_SEED: [TimesheetSeed; 5] = [
    (1, "John Doe", "09:00:00", "17:30:00", "08:30:00", "00:30:00", "00:15:00", 0.0, 2.5, 0.0, 0.25, 15.0, 50.0, "Completed all assigned tasks efficiently"),
    (2, "Jane Smith", "08:30:00", "18:00:00", "09:00:00", "01:00:00", "00:30:00", 1.0, 0.0, 0.0, 0.0, 0.0, 75.0, "Worked late to meet campaign deadline"),
    (3, "Ahmed Hassan", "09:15:00", "17:45:00", "08:00:00", "00:00:00", "00:30:00", 0.0, 1.0, 0.0, 0.25, 10.0, 25.0, "API endpoints completed successfully"),
    (4, "Sarah Johnson", "08:00:00", "19:00:00", "10:00:00", "02:00:00", "01:00:00", 0.0, 3.0, 0.0, 0.0, 0.0, 100.0, "Client meetings and system demonstrations"),
    (5, "Mohamed Ali", "09:30:00", "", "00:00:00", "00:00:00", "00:00:00", 0.0, 0.0, 4.0, 0.5, 20.0, 0.0, "Currently conducting training session"),
];

/// Five Monday entries, all `Active`.
pub fn sample_timesheet() -> Vec<TimesheetRecord> {
    TIMESHEET_SEED
        .iter()
        .map(
            |&(id, name, check_in, check_out, total, overtime, wasted, permission, mission, leave, delay, deduction, bonus, notes)| {
                TimesheetRecord {
                    id,
                    name: name.to_string(),
                    day: "Monday".to_string(),
                    date: SAMPLE_PAY_DATE.to_string(),
                    check_in: check_in.to_string(),
                    check_out: check_out.to_string(),
                    total_hours: total.to_string(),
                    overtime: overtime.to_string(),
                    wasted_time: wasted.to_string(),
                    permission,
                    mission,
                    leave_type: leave,
                    delay,
                    deduction,
                    bonus,
                    notes: notes.to_string(),
                    ..Default::default()
                }
            },
        )
        .collect()
}
