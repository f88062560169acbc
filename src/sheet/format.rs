use std::collections::HashSet;
use std::hash::Hash;

use super::CellKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChange {
    Applied,
    Removed,
}

/// Bold and highlight marks, keyed by cell.
pub struct CellFormatting<F> {
    bold: HashSet<CellKey<F>>,
    highlighted: HashSet<CellKey<F>>,
}

impl<F> Default for CellFormatting<F> {
    fn default() -> Self {
        Self { bold: HashSet::new(), highlighted: HashSet::new() }
    }
}

impl<F: Copy + Eq + Hash> CellFormatting<F> {
    pub fn toggle_bold(&mut self, key: CellKey<F>) -> FormatChange {
        toggle(&mut self.bold, key)
    }

    pub fn toggle_highlight(&mut self, key: CellKey<F>) -> FormatChange {
        toggle(&mut self.highlighted, key)
    }

    pub fn is_bold(&self, key: &CellKey<F>) -> bool {
        self.bold.contains(key)
    }

    pub fn is_highlighted(&self, key: &CellKey<F>) -> bool {
        self.highlighted.contains(key)
    }

    pub fn remove_row(&mut self, row: usize) {
        self.bold = shift(std::mem::take(&mut self.bold), row);
        self.highlighted = shift(std::mem::take(&mut self.highlighted), row);
    }

    pub fn clear(&mut self) {
        self.bold.clear();
        self.highlighted.clear();
    }
}

fn toggle<F: Eq + Hash>(set: &mut HashSet<CellKey<F>>, key: CellKey<F>) -> FormatChange {
    if set.remove(&key) {
        FormatChange::Removed
    } else {
        set.insert(key);
        FormatChange::Applied
    }
}

fn shift<F: Eq + Hash>(set: HashSet<CellKey<F>>, removed: usize) -> HashSet<CellKey<F>> {
    set.into_iter().filter_map(|key| key.after_removal(removed)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_removes_the_mark() {
        let mut formatting = CellFormatting::default();
        let key = CellKey::new(2, "net_pay");

        assert_eq!(formatting.toggle_bold(key), FormatChange::Applied);
        assert!(formatting.is_bold(&key));
        assert!(!formatting.is_highlighted(&key));
        assert_eq!(formatting.toggle_bold(key), FormatChange::Removed);
        assert!(!formatting.is_bold(&key));
    }

    #[test]
    fn bold_and_highlight_are_independent() {
        let mut formatting = CellFormatting::default();
        let key = CellKey::new(0, "bonus");
        formatting.toggle_highlight(key);
        assert!(formatting.is_highlighted(&key));
        assert!(!formatting.is_bold(&key));
    }

    #[test]
    fn marks_on_removed_row_disappear() {
        let mut formatting = CellFormatting::default();
        formatting.toggle_bold(CellKey::new(0, "id"));
        formatting.toggle_bold(CellKey::new(1, "id"));
        formatting.toggle_highlight(CellKey::new(3, "id"));

        formatting.remove_row(1);

        assert!(formatting.is_bold(&CellKey::new(0, "id")));
        assert!(!formatting.is_bold(&CellKey::new(1, "id")));
        assert!(formatting.is_highlighted(&CellKey::new(2, "id")));
    }
}
