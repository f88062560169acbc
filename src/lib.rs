//! Payroll, timesheet and leave data-entry engine: derived pay calculation, batch
//! submission with per-row validation, grid undo/redo, CSV exchange and the
//! HTTP surface over them.

pub mod api;
pub mod config;
pub mod docs;
pub mod engine;
pub mod error;
pub mod model;
pub mod routes;
pub mod seed;
pub mod sheet;
pub mod utils;
