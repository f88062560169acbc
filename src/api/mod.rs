use actix_web::{Responder, get};
use chrono::{Local, NaiveDate};

pub mod leave;
pub mod payroll;
pub mod timesheet;

#[get("/")]
pub async fn index() -> impl Responder {
    "Payroll desk is running"
}

/// Local date used for new and imported rows.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
