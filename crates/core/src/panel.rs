//! Extra-tags dropdown panel — an open/closed state machine with a
//! pending-selection buffer.
//!
//! Checkbox changes accumulate in the buffer while the panel is open and
//! commit into the filter set only on apply (clear commits the explicitly
//! emptied buffer). Dismissal without apply closes the panel and commits
//! nothing; the buffer keeps whatever is showing, and a later apply uses it
//! as-is.

use std::collections::BTreeSet;

use crate::filter::FilterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

#[derive(Debug, Clone)]
pub struct ExtraTagsPanel {
    /// Tag values whose checkboxes live in this panel. Apply and clear
    /// touch only these and leave every other filter alone.
    governs: Vec<String>,
    checked: BTreeSet<String>,
    state: PanelState,
}

impl ExtraTagsPanel {
    pub fn new(governs: Vec<String>) -> Self {
        ExtraTagsPanel { governs, checked: BTreeSet::new(), state: PanelState::Closed }
    }

    /// Seed the checkbox buffer from the committed filter set (page load).
    pub fn seed_from(&mut self, committed: &FilterSet) {
        self.checked = self
            .governs
            .iter()
            .filter(|value| committed.contains(value))
            .cloned()
            .collect();
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    /// Toggle-button interaction flips the state.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        };
    }

    /// Outside click or escape: close without committing.
    pub fn dismiss(&mut self) {
        self.state = PanelState::Closed;
    }

    /// Checkbox change. Values the panel does not govern are ignored.
    /// Takes effect on the buffer regardless of open/closed state.
    pub fn set_checked(&mut self, value: &str, checked: bool) {
        if !self.governs.iter().any(|governed| governed == value) {
            return;
        }
        if checked {
            self.checked.insert(value.to_string());
        } else {
            self.checked.remove(value);
        }
    }

    /// Live checkbox tally for the count badge, committed or not.
    pub fn badge_count(&self) -> usize {
        self.checked.len()
    }

    /// Commit: the committed set with every governed value removed, then
    /// re-added per checked box. Closes the panel.
    pub fn apply(&mut self, committed: &FilterSet) -> FilterSet {
        self.state = PanelState::Closed;
        let mut next = committed.clone();
        for value in &self.governs {
            next.remove(value);
        }
        for value in &self.checked {
            next.insert(value.clone());
        }
        next
    }

    /// Commit with every checkbox treated unchecked: empties the buffer,
    /// closes the panel, and strips every governed value from the set.
    pub fn clear(&mut self, committed: &FilterSet) -> FilterSet {
        self.checked.clear();
        self.apply(committed)
    }
}
