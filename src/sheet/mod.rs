//! Caller-owned editing session for a data-entry grid.
//!
//! A [`Worksheet`] owns the working rows plus the two undo mechanisms the
//! grids expose: per-cell history for the selected cell, and whole-table
//! snapshots taken on structural changes. Cell history always wins.

pub mod filter;
pub mod format;
pub mod history;

use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::utils::number::{finite_or_zero, parse_amount};
use format::CellFormatting;
use history::{CellHistory, TableHistory};

/// Value typed into, or read out of, a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading; blank or malformed text is 0.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => finite_or_zero(*n),
            CellValue::Text(s) => parse_amount(s),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Position of a cell: row index into the working set plus the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey<F> {
    pub row: usize,
    pub field: F,
}

impl<F> CellKey<F> {
    pub fn new(row: usize, field: F) -> Self {
        Self { row, field }
    }

    /// Where this key points after `removed` is deleted; `None` if it was on
    /// the removed row.
    pub fn after_removal(self, removed: usize) -> Option<Self> {
        use std::cmp::Ordering;
        match self.row.cmp(&removed) {
            Ordering::Less => Some(self),
            Ordering::Equal => None,
            Ordering::Greater => Some(Self { row: self.row - 1, field: self.field }),
        }
    }
}

impl<F: AsRef<str>> fmt::Display for CellKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.field.as_ref())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("row {row} is out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("column {0} is read-only")]
    ReadOnlyField(String),

    #[error("{value:?} is not a valid {field}")]
    InvalidValue { field: String, value: String },
}

/// A grid row that can be edited cell by cell.
pub trait SheetRow: Clone {
    type Field: Copy + Eq + Hash + fmt::Debug + AsRef<str>;

    /// Short name used in audit log lines.
    const KIND: &'static str;

    fn id(&self) -> u64;

    fn read(&self, field: Self::Field) -> CellValue;

    /// Apply a user edit. Implementations keep derived state in sync and
    /// move the status along the edit rule.
    fn write(&mut self, field: Self::Field, value: &CellValue) -> Result<(), SheetError>;

    /// Fresh row inserted by the user.
    fn blank(id: u64, today: NaiveDate) -> Self;
}

/// What an undo request reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoEffect<F> {
    Cell(CellKey<F>),
    Table,
}

pub struct Worksheet<R: SheetRow> {
    rows: Vec<R>,
    history: TableHistory<R>,
    cells: CellHistory<R::Field>,
    formatting: CellFormatting<R::Field>,
    dirty: bool,
}

impl<R: SheetRow> Worksheet<R> {
    /// Start a session with `rows` as the undo baseline.
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            history: TableHistory::new(rows.clone()),
            rows,
            cells: CellHistory::default(),
            formatting: CellFormatting::default(),
            dirty: false,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn formatting(&self) -> &CellFormatting<R::Field> {
        &self.formatting
    }

    pub fn formatting_mut(&mut self) -> &mut CellFormatting<R::Field> {
        &mut self.formatting
    }

    /// Edits made since the last commit.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || !self.cells.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Smallest id above every id in the working set.
    pub fn next_id(&self) -> u64 {
        self.rows.iter().map(SheetRow::id).max().unwrap_or(0).saturating_add(1)
    }

    pub fn edit_cell(
        &mut self,
        row: usize,
        field: R::Field,
        value: impl Into<CellValue>,
    ) -> Result<(), SheetError> {
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(SheetError::RowOutOfRange { row, len })?;

        let previous = target.read(field);
        target.write(field, &value.into())?;

        self.cells.record(CellKey::new(row, field), previous);
        self.dirty = true;
        Ok(())
    }

    /// Append a blank row and return its index.
    pub fn add_row(&mut self, today: NaiveDate) -> usize {
        let row = R::blank(self.next_id(), today);
        self.rows.push(row);
        self.snapshot();
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, row: usize) -> Result<R, SheetError> {
        if row >= self.rows.len() {
            return Err(SheetError::RowOutOfRange { row, len: self.rows.len() });
        }
        let removed = self.rows.remove(row);
        self.cells.remove_row(row);
        self.formatting.remove_row(row);
        self.snapshot();
        Ok(removed)
    }

    /// Append imported rows; returns how many were added.
    pub fn append(&mut self, rows: Vec<R>) -> usize {
        let added = rows.len();
        if added > 0 {
            self.rows.extend(rows);
            self.snapshot();
        }
        added
    }

    /// Undo the selected cell's last edit if it has one, otherwise roll the
    /// table back one snapshot.
    pub fn undo(&mut self, selected: Option<CellKey<R::Field>>) -> Option<UndoEffect<R::Field>> {
        if let Some(key) = selected {
            if let Some(previous) = self.cells.take(&key) {
                if let Some(row) = self.rows.get_mut(key.row) {
                    // Recorded cells are editable, so restoring cannot be refused.
                    if row.write(key.field, &previous).is_ok() {
                        debug!(cell = ?key, "cell edit undone");
                        return Some(UndoEffect::Cell(key));
                    }
                }
            }
        }

        let previous = self.history.undo()?;
        self.restore(previous);
        self.dirty = false;
        debug!(rows = self.rows.len(), "table reverted to previous snapshot");
        Some(UndoEffect::Table)
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.restore(next);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Make `rows` the new baseline. Cell history and redo are dropped.
    pub fn commit(&mut self, rows: Vec<R>) {
        self.history.reset(rows.clone());
        self.rows = rows;
        self.cells.clear();
        self.dirty = false;
    }

    /// Swap in a table snapshot. Cell history and formatting are keyed by row
    /// position and are dropped with the rows they pointed at.
    fn restore(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.cells.clear();
        self.formatting.clear();
    }

    fn snapshot(&mut self) {
        self.history.push(self.rows.clone());
        self.dirty = true;
    }
}
