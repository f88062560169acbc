//! Payroll field calculator.
//!
//! Maps a record's inputs to its derived pay fields. Pure and idempotent:
//! derived fields on the input are ignored and overwritten.

use crate::model::payroll::PayrollRecord;
use crate::utils::number::finite_or_zero;

/// Divisor turning a monthly salary into a daily rate.
pub const PAY_PERIODS_PER_CYCLE: f64 = 26.0;

/// Working hours per day used for the overtime rate.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Round to cents, half away from zero.
pub fn round_money(value: f64) -> f64 {
    (finite_or_zero(value) * 100.0).round() / 100.0
}

/// Derived half of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedPay {
    pub bonus_rate: f64,
    pub bonus: f64,
    pub business_trip_amount: f64,
    pub ot_rate: f64,
    pub ot_amount: f64,
    pub deduction_rate: f64,
    pub deductions: f64,
    pub gross_pay: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
}

/// Compute every derived field from the record's inputs.
///
/// Each output is rounded from unrounded intermediates, except `net_pay`,
/// which is taken from the rounded gross and total so that
/// `net_pay == gross_pay - total_deductions` holds to the cent.
pub fn derive_pay(record: &PayrollRecord) -> DerivedPay {
    let basic_salary = finite_or_zero(record.basic_salary);
    let incentive = finite_or_zero(record.incentive);
    let special_bonus = finite_or_zero(record.special_bonus);
    let bonuses = finite_or_zero(record.number_of_bonuses);
    let trips = finite_or_zero(record.number_of_business_trips);
    let ot_hours = finite_or_zero(record.ot_hours);
    let social_insurance = finite_or_zero(record.social_insurance);
    let advances = finite_or_zero(record.advances);
    let transportation = finite_or_zero(record.transportation_deductions);
    let deduction_count = finite_or_zero(record.number_of_deductions);

    // no salary, no accrual
    let (daily_rate, hourly_rate) = if basic_salary > 0.0 {
        let daily = basic_salary / PAY_PERIODS_PER_CYCLE;
        (daily, daily / HOURS_PER_DAY)
    } else {
        (0.0, 0.0)
    };

    let bonus = daily_rate * bonuses;
    let business_trip_amount = daily_rate * trips;
    let ot_amount = hourly_rate * ot_hours;
    let deductions = daily_rate * deduction_count;

    let gross_pay =
        round_money(basic_salary + incentive + special_bonus + bonus + business_trip_amount + ot_amount);
    let total_deductions = round_money(social_insurance + advances + transportation + deductions);

    DerivedPay {
        bonus_rate: round_money(daily_rate),
        bonus: round_money(bonus),
        business_trip_amount: round_money(business_trip_amount),
        ot_rate: round_money(hourly_rate),
        ot_amount: round_money(ot_amount),
        deduction_rate: round_money(daily_rate),
        deductions: round_money(deductions),
        gross_pay,
        total_deductions,
        net_pay: round_money(gross_pay - total_deductions),
    }
}

/// Return a copy of `record` with normalized inputs and fresh derived fields.
pub fn calculate(record: &PayrollRecord) -> PayrollRecord {
    let mut out = record.clone();
    out.normalize_inputs();

    let pay = derive_pay(&out);
    out.bonus_rate = pay.bonus_rate;
    out.bonus = pay.bonus;
    out.business_trip_amount = pay.business_trip_amount;
    out.ot_rate = pay.ot_rate;
    out.ot_amount = pay.ot_amount;
    out.deduction_rate = pay.deduction_rate;
    out.deductions = pay.deductions;
    out.gross_pay = pay.gross_pay;
    out.total_deductions = pay.total_deductions;
    out.net_pay = pay.net_pay;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::status::RecordStatus;
    use pretty_assertions::assert_eq;

    fn john_doe() -> PayrollRecord {
        PayrollRecord {
            id: 1,
            employee_name: "John Doe".into(),
            payment_date: "2024-01-15".into(),
            basic_salary: 75000.0,
            incentive: 5000.0,
            special_bonus: 2000.0,
            number_of_bonuses: 2.0,
            number_of_business_trips: 1.0,
            ot_hours: 10.0,
            social_insurance: 1500.0,
            advances: 1000.0,
            transportation_deductions: 500.0,
            number_of_deductions: 1.0,
            status: RecordStatus::Modified,
            ..Default::default()
        }
    }

    fn assert_net_invariant(record: &PayrollRecord) {
        let expected = record.gross_pay - record.total_deductions;
        assert!(
            (record.net_pay - expected).abs() < 1e-6,
            "net {} != gross {} - deductions {}",
            record.net_pay,
            record.gross_pay,
            record.total_deductions
        );
    }

    #[test]
    fn reference_employee_matches_payroll_sheet() {
        let out = calculate(&john_doe());

        assert_eq!(out.bonus_rate, 2884.62);
        assert_eq!(out.bonus, 5769.23);
        assert_eq!(out.business_trip_amount, 2884.62);
        assert_eq!(out.ot_rate, 360.58);
        assert_eq!(out.ot_amount, 3605.77);
        assert_eq!(out.deduction_rate, 2884.62);
        assert_eq!(out.deductions, 2884.62);
        assert_eq!(out.gross_pay, 94259.62);
        assert_eq!(out.total_deductions, 5884.62);
        assert_eq!(out.net_pay, 88375.0);
        assert_eq!(out.status, RecordStatus::Modified);
    }

    #[test]
    fn bonus_and_deduction_rates_share_the_daily_rate() {
        for salary in [1.0, 26.0, 1234.56, 75000.0, 99999.99] {
            let out = calculate(&PayrollRecord { id: 1, basic_salary: salary, ..Default::default() });
            assert_eq!(out.bonus_rate, out.deduction_rate);
            assert_eq!(out.bonus_rate, round_money(salary / 26.0));
        }
    }

    #[test]
    fn no_salary_means_no_accrual() {
        for salary in [0.0, -5000.0] {
            let record = PayrollRecord {
                id: 1,
                basic_salary: salary,
                number_of_bonuses: 3.0,
                number_of_business_trips: 2.0,
                ot_hours: 40.0,
                number_of_deductions: 1.0,
                ..Default::default()
            };
            let out = calculate(&record);
            assert_eq!(out.bonus_rate, 0.0);
            assert_eq!(out.bonus, 0.0);
            assert_eq!(out.business_trip_amount, 0.0);
            assert_eq!(out.ot_rate, 0.0);
            assert_eq!(out.ot_amount, 0.0);
            assert_eq!(out.deduction_rate, 0.0);
            assert_eq!(out.deductions, 0.0);
        }
    }

    #[test]
    fn recalculating_is_idempotent() {
        let once = calculate(&john_doe());
        let twice = calculate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn stale_derived_fields_are_overwritten() {
        let mut record = john_doe();
        record.net_pay = 1.0;
        record.gross_pay = -42.0;
        let out = calculate(&record);
        assert_eq!(out.net_pay, 88375.0);
        assert_eq!(out.gross_pay, 94259.62);
    }

    #[test]
    fn non_finite_inputs_are_treated_as_zero() {
        let record = PayrollRecord {
            id: 9,
            basic_salary: 26000.0,
            incentive: f64::NAN,
            ot_hours: f64::INFINITY,
            advances: f64::NEG_INFINITY,
            ..Default::default()
        };
        let out = calculate(&record);
        assert_eq!(out.incentive, 0.0);
        assert_eq!(out.ot_hours, 0.0);
        assert_eq!(out.ot_amount, 0.0);
        assert_eq!(out.gross_pay, 26000.0);
        assert_eq!(out.net_pay, 26000.0);
        assert!(out.net_pay.is_finite());
    }

    #[test]
    fn net_pay_is_gross_minus_deductions() {
        let samples = [
            john_doe(),
            PayrollRecord { id: 2, basic_salary: 85000.0, incentive: 6000.0, ot_hours: 8.0, ..Default::default() },
            PayrollRecord {
                id: 3,
                basic_salary: 65000.0,
                number_of_bonuses: 3.0,
                ot_hours: 15.0,
                social_insurance: 1300.0,
                advances: 800.0,
                transportation_deductions: 400.0,
                number_of_deductions: 2.0,
                ..Default::default()
            },
            PayrollRecord { id: 4, basic_salary: 0.0, advances: 300.0, ..Default::default() },
            PayrollRecord { id: 5, basic_salary: 333.33, ot_hours: 7.5, number_of_deductions: 4.0, ..Default::default() },
        ];

        for record in samples {
            assert_net_invariant(&calculate(&record));
        }
    }
}
