use std::collections::HashMap;
use std::hash::Hash;

use super::{CellKey, CellValue};

/// Whole-table snapshots. The first entry is the baseline and is never popped.
pub struct TableHistory<R> {
    snapshots: Vec<Vec<R>>,
    redo: Vec<Vec<R>>,
}

impl<R: Clone> TableHistory<R> {
    pub fn new(baseline: Vec<R>) -> Self {
        Self { snapshots: vec![baseline], redo: Vec::new() }
    }

    pub fn push(&mut self, snapshot: Vec<R>) {
        self.snapshots.push(snapshot);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Drop the latest snapshot and return the one before it.
    pub fn undo(&mut self) -> Option<Vec<R>> {
        if !self.can_undo() {
            return None;
        }
        let current = self.snapshots.pop()?;
        self.redo.push(current);
        self.snapshots.last().cloned()
    }

    pub fn redo(&mut self) -> Option<Vec<R>> {
        let next = self.redo.pop()?;
        self.snapshots.push(next.clone());
        Some(next)
    }

    pub fn reset(&mut self, baseline: Vec<R>) {
        self.snapshots = vec![baseline];
        self.redo.clear();
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}

/// Prior value of each edited cell, latest edit wins.
pub struct CellHistory<F> {
    previous: HashMap<CellKey<F>, CellValue>,
}

impl<F> Default for CellHistory<F> {
    fn default() -> Self {
        Self { previous: HashMap::new() }
    }
}

impl<F: Copy + Eq + Hash> CellHistory<F> {
    pub fn record(&mut self, key: CellKey<F>, previous: CellValue) {
        self.previous.insert(key, previous);
    }

    pub fn take(&mut self, key: &CellKey<F>) -> Option<CellValue> {
        self.previous.remove(key)
    }

    pub fn remove_row(&mut self, row: usize) {
        self.previous = std::mem::take(&mut self.previous)
            .into_iter()
            .filter_map(|(key, value)| key.after_removal(row).map(|key| (key, value)))
            .collect();
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    pub fn len(&self) -> usize {
        self.previous.len()
    }
}
