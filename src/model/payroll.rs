use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::engine::calculator;
use crate::model::status::RecordStatus;
use crate::sheet::{CellValue, SheetError, SheetRow};
use crate::utils::number::{finite_or_zero, lenient_f64, parse_id};

/// One employee's pay-period entry.
///
/// Input fields are edited by the user; derived fields are only ever written
/// by [`calculator::calculate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "employeeName": "John Doe",
    "paymentDate": "2024-01-15",
    "basicSalary": 75000,
    "incentive": 5000,
    "specialBonus": 2000,
    "numberOfBonuses": 2,
    "numberOfBusinessTrips": 1,
    "otHours": 10,
    "socialInsurance": 1500,
    "advances": 1000,
    "transportationDeductions": 500,
    "numberOfDeductions": 1,
    "status": "Modified"
}))]
pub struct PayrollRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[serde(default)]
    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[serde(default)]
    #[schema(example = "2024-01-15", format = "date")]
    pub payment_date: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub basic_salary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub incentive: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub special_bonus: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub number_of_bonuses: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub number_of_business_trips: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ot_hours: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub social_insurance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub advances: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transportation_deductions: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub number_of_deductions: f64,

    // derived
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bonus_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bonus: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub business_trip_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ot_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ot_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub deduction_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub deductions: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gross_pay: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_deductions: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_pay: f64,

    #[serde(default)]
    #[schema(value_type = String, example = "Pending")]
    pub status: RecordStatus,
}

impl PayrollRecord {
    /// True when the three required fields are all absent.
    pub fn is_blank(&self) -> bool {
        self.employee_name.trim().is_empty()
            && self.payment_date.trim().is_empty()
            && self.basic_salary <= 0.0
    }

    /// True when at least one of name, date or salary is absent.
    pub fn is_missing_required(&self) -> bool {
        self.employee_name.trim().is_empty()
            || self.payment_date.trim().is_empty()
            || self.basic_salary <= 0.0
    }

    /// Replace NaN and infinite inputs with 0.
    pub fn normalize_inputs(&mut self) {
        for value in [
            &mut self.basic_salary,
            &mut self.incentive,
            &mut self.special_bonus,
            &mut self.number_of_bonuses,
            &mut self.number_of_business_trips,
            &mut self.ot_hours,
            &mut self.social_insurance,
            &mut self.advances,
            &mut self.transportation_deductions,
            &mut self.number_of_deductions,
        ] {
            *value = finite_or_zero(*value);
        }
    }

    pub(crate) fn number_mut(&mut self, field: PayrollField) -> Option<&mut f64> {
        use PayrollField::*;
        let slot = match field {
            BasicSalary => &mut self.basic_salary,
            Incentive => &mut self.incentive,
            SpecialBonus => &mut self.special_bonus,
            NumberOfBonuses => &mut self.number_of_bonuses,
            NumberOfBusinessTrips => &mut self.number_of_business_trips,
            OtHours => &mut self.ot_hours,
            SocialInsurance => &mut self.social_insurance,
            Advances => &mut self.advances,
            TransportationDeductions => &mut self.transportation_deductions,
            NumberOfDeductions => &mut self.number_of_deductions,
            BonusRate => &mut self.bonus_rate,
            Bonus => &mut self.bonus,
            BusinessTripAmount => &mut self.business_trip_amount,
            OtRate => &mut self.ot_rate,
            OtAmount => &mut self.ot_amount,
            DeductionRate => &mut self.deduction_rate,
            Deductions => &mut self.deductions,
            GrossPay => &mut self.gross_pay,
            TotalDeductions => &mut self.total_deductions,
            NetPay => &mut self.net_pay,
            Id | EmployeeName | PaymentDate | Status => return None,
        };
        Some(slot)
    }

    fn number(&self, field: PayrollField) -> Option<f64> {
        use PayrollField::*;
        let value = match field {
            BasicSalary => self.basic_salary,
            Incentive => self.incentive,
            SpecialBonus => self.special_bonus,
            NumberOfBonuses => self.number_of_bonuses,
            NumberOfBusinessTrips => self.number_of_business_trips,
            OtHours => self.ot_hours,
            SocialInsurance => self.social_insurance,
            Advances => self.advances,
            TransportationDeductions => self.transportation_deductions,
            NumberOfDeductions => self.number_of_deductions,
            BonusRate => self.bonus_rate,
            Bonus => self.bonus,
            BusinessTripAmount => self.business_trip_amount,
            OtRate => self.ot_rate,
            OtAmount => self.ot_amount,
            DeductionRate => self.deduction_rate,
            Deductions => self.deductions,
            GrossPay => self.gross_pay,
            TotalDeductions => self.total_deductions,
            NetPay => self.net_pay,
            Id | EmployeeName | PaymentDate | Status => return None,
        };
        Some(value)
    }
}

/// Every payroll column, in CSV export order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    AsRefStr,
    EnumString,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum PayrollField {
    Id,
    EmployeeName,
    PaymentDate,
    BasicSalary,
    Incentive,
    SpecialBonus,
    NumberOfBonuses,
    BonusRate,
    Bonus,
    NumberOfBusinessTrips,
    BusinessTripAmount,
    OtHours,
    OtRate,
    OtAmount,
    GrossPay,
    SocialInsurance,
    Advances,
    TransportationDeductions,
    NumberOfDeductions,
    DeductionRate,
    Deductions,
    TotalDeductions,
    NetPay,
    Status,
}

static HEADER_LOOKUP: Lazy<HashMap<String, PayrollField>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for field in PayrollField::iter() {
        lookup.insert(field.label().to_lowercase(), field);
        lookup.insert(field.grid_label().to_lowercase(), field);
        lookup.insert(field.as_ref().to_string(), field);
    }
    lookup
});

impl PayrollField {
    /// CSV header text.
    pub fn label(self) -> &'static str {
        use PayrollField::*;
        match self {
            Id => "ID",
            EmployeeName => "Employee Name",
            PaymentDate => "Payment Date",
            BasicSalary => "Basic Salary",
            Incentive => "Incentive",
            SpecialBonus => "Special Bonus",
            NumberOfBonuses => "Number of Bonuses",
            BonusRate => "Bonus Rate",
            Bonus => "Bonus",
            NumberOfBusinessTrips => "Number of Business Trips",
            BusinessTripAmount => "Business Trip Amount",
            OtHours => "OT Hours",
            OtRate => "OT Rate",
            OtAmount => "OT Amount",
            GrossPay => "Gross Pay",
            SocialInsurance => "Social Insurance",
            Advances => "Advances",
            TransportationDeductions => "Transportation Deductions",
            NumberOfDeductions => "Number of Deductions",
            DeductionRate => "Deduction Rate",
            Deductions => "Deductions",
            TotalDeductions => "Total Deductions",
            NetPay => "Net Pay",
            Status => "Status",
        }
    }

    /// Short column title used by the grid.
    pub fn grid_label(self) -> &'static str {
        match self {
            PayrollField::NumberOfBonuses => "# Bonuses",
            PayrollField::NumberOfBusinessTrips => "# Business Trips",
            PayrollField::NumberOfDeductions => "# Deductions",
            other => other.label(),
        }
    }

    /// Resolve a header by label, grid label or snake_case key, ignoring case.
    pub fn from_header(header: &str) -> Option<Self> {
        let key = header.trim().trim_matches('"').trim().to_lowercase();
        HEADER_LOOKUP.get(&key).copied()
    }

    pub fn is_derived(self) -> bool {
        use PayrollField::*;
        matches!(
            self,
            BonusRate
                | Bonus
                | BusinessTripAmount
                | OtRate
                | OtAmount
                | GrossPay
                | DeductionRate
                | Deductions
                | TotalDeductions
                | NetPay
        )
    }

    pub fn is_editable(self) -> bool {
        !self.is_derived() && self != PayrollField::Status
    }

    /// Whole-number columns; CSV import truncates these.
    pub fn is_count(self) -> bool {
        matches!(
            self,
            PayrollField::NumberOfBonuses
                | PayrollField::NumberOfBusinessTrips
                | PayrollField::NumberOfDeductions
        )
    }
}

impl SheetRow for PayrollRecord {
    type Field = PayrollField;

    const KIND: &'static str = "payroll";

    fn id(&self) -> u64 {
        self.id
    }


    fn read(&self, field: PayrollField) -> CellValue {
        match field {
            PayrollField::Id => CellValue::Number(self.id as f64),
            PayrollField::EmployeeName => CellValue::Text(self.employee_name.clone()),
            PayrollField::PaymentDate => CellValue::Text(self.payment_date.clone()),
            PayrollField::Status => CellValue::Text(self.status.to_string()),
            numeric => CellValue::Number(self.number(numeric).unwrap_or_default()),
        }
    }

    fn write(&mut self, field: PayrollField, value: &CellValue) -> Result<(), SheetError> {
        if !field.is_editable() {
            return Err(SheetError::ReadOnlyField(field.as_ref().to_string()));
        }

        match field {
            PayrollField::Id => {
                self.id = parse_id(value.as_number()).ok_or_else(|| SheetError::InvalidValue {
                    field: field.as_ref().to_string(),
                    value: value.as_text(),
                })?
            }
            PayrollField::EmployeeName => self.employee_name = value.as_text(),
            PayrollField::PaymentDate => self.payment_date = value.as_text(),
            numeric => {
                if let Some(slot) = self.number_mut(numeric) {
                    *slot = value.as_number();
                }
            }
        }

        *self = calculator::calculate(self);
        self.status = self.status.after_edit();
        Ok(())
    }

    fn blank(id: u64, today: NaiveDate) -> Self {
        PayrollRecord {
            id,
            payment_date: today.format("%Y-%m-%d").to_string(),
            status: RecordStatus::Pending,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headers_resolve_case_insensitively() {
        assert_eq!(PayrollField::from_header("basic salary"), Some(PayrollField::BasicSalary));
        assert_eq!(PayrollField::from_header(" \"OT HOURS\" "), Some(PayrollField::OtHours));
        assert_eq!(PayrollField::from_header("# Bonuses"), Some(PayrollField::NumberOfBonuses));
        assert_eq!(
            PayrollField::from_header("transportation_deductions"),
            Some(PayrollField::TransportationDeductions)
        );
        assert_eq!(PayrollField::from_header("Department"), None);
    }

    #[test]
    fn derived_and_status_columns_are_read_only() {
        let mut record = PayrollRecord { id: 1, ..Default::default() };
        let err = record.write(PayrollField::NetPay, &CellValue::Number(1.0)).unwrap_err();
        assert_eq!(err, SheetError::ReadOnlyField("net_pay".into()));
        assert!(record.write(PayrollField::Status, &"Success".into()).is_err());
        assert!(PayrollField::Id.is_editable());
    }

    #[test]
    fn editing_an_input_recalculates_and_marks_modified() {
        let mut record = PayrollRecord {
            id: 3,
            employee_name: "Ahmed Hassan".into(),
            payment_date: "2024-01-15".into(),
            status: RecordStatus::Loaded,
            ..Default::default()
        };

        record.write(PayrollField::BasicSalary, &"52000".into()).unwrap();

        assert_eq!(record.basic_salary, 52000.0);
        assert_eq!(record.bonus_rate, 2000.0);
        assert_eq!(record.ot_rate, 250.0);
        assert_eq!(record.gross_pay, 52000.0);
        assert_eq!(record.status, RecordStatus::Modified);
    }

    #[test]
    fn id_must_stay_positive() {
        let mut record = PayrollRecord { id: 4, status: RecordStatus::Loaded, ..Default::default() };

        let err = record.write(PayrollField::Id, &CellValue::Number(0.0)).unwrap_err();
        assert_eq!(
            err,
            SheetError::InvalidValue { field: "id".into(), value: "0".into() }
        );
        assert!(record.write(PayrollField::Id, &"-2".into()).is_err());
        assert_eq!(record.id, 4);
        assert_eq!(record.status, RecordStatus::Loaded);

        record.write(PayrollField::Id, &"12".into()).unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.status, RecordStatus::Modified);
    }

    #[test]
    fn unparseable_numeric_text_becomes_zero() {
        let mut record = PayrollRecord { id: 1, basic_salary: 100.0, ..Default::default() };
        record.write(PayrollField::BasicSalary, &"lots".into()).unwrap();
        assert_eq!(record.basic_salary, 0.0);
        assert_eq!(record.status, RecordStatus::Pending);
    }

    #[test]
    fn blank_row_carries_today_and_pending() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let row = PayrollRecord::blank(8, today);
        assert_eq!(row.id, 8);
        assert_eq!(row.payment_date, "2024-03-09");
        assert_eq!(row.status, RecordStatus::Pending);
        assert!(!row.is_blank());
        assert!(row.is_missing_required());
    }
}
