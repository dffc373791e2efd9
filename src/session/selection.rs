//! Multi-selection over the rendered result list
//!
//! Plain clicks toggle one record; a range-modified click (shift-click)
//! adds every record between the previous click and this one. Range
//! selection only ever adds. Indices refer to the list that was rendered
//! when the click happened, so the anchor is dropped whenever that list
//! is replaced.

use crate::api::Record;

/// Selected record ids plus the anchor for range selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: Vec<String>,
    last_clicked: Option<usize>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if selected, otherwise add it; returns the new state
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(position);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    /// Add `id` unless already selected; returns whether it was added
    pub fn insert(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected.push(id.to_string());
        true
    }

    /// Add every record in the inclusive span between `from` and `to`
    ///
    /// Endpoint order does not matter. Indices past the end of `results`
    /// are ignored.
    pub fn select_range(&mut self, from: usize, to: usize, results: &[Record]) {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        for record in results.iter().skip(start).take((end - start).saturating_add(1)) {
            if !self.is_selected(&record.id) {
                self.selected.push(record.id.clone());
            }
        }
    }

    /// Apply a click on `results[index]`
    ///
    /// With the range modifier and an existing anchor this selects the
    /// range; otherwise it toggles the clicked record. Either way the
    /// clicked index becomes the new anchor. Returns `false` without
    /// changing anything when `index` is outside `results`.
    pub fn record_click(&mut self, index: usize, range_modifier: bool, results: &[Record]) -> bool {
        let Some(record) = results.get(index) else {
            return false;
        };

        match self.last_clicked {
            Some(anchor) if range_modifier => self.select_range(anchor, index, results),
            _ => {
                self.toggle(&record.id);
            }
        }
        self.last_clicked = Some(index);
        true
    }

    /// Empty the selection and drop the anchor
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_clicked = None;
    }

    /// Drop the range anchor, keeping selected ids
    pub const fn invalidate_anchor(&mut self) {
        self.last_clicked = None;
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Selected ids in selection order
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub const fn last_clicked(&self) -> Option<usize> {
        self.last_clicked
    }
}
