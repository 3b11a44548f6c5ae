use crate::models::{Property, PropertyId};
use tracing::debug;

/// Keep only loved entries when `loved_only` is set. Order is preserved.
pub fn filter_loved(list: &[Property], loved_only: bool) -> Vec<Property> {
    list.iter()
        .filter(|p| !loved_only || p.loved)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    /// First load in flight; partial results may already be visible
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Visible list re-derived from loaded data
    Applied,
    /// Nothing has been loaded yet; caller should start a refresh
    NeedsLoad,
}

/// State behind the saved-homes screen.
///
/// Owned by whoever drives the screen and reset explicitly when the user
/// signs out, so nothing about a previous load leaks into the next one.
#[derive(Debug, Clone, Default)]
pub struct SavedView {
    state: ViewState,
    items: Vec<Property>,
    loved_only: bool,
}

impl SavedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn loved_only(&self) -> bool {
        self.loved_only
    }

    /// Idle moves to Loading. Once loaded, later refreshes stay Loaded and
    /// the current list stays on screen until the new one lands.
    pub fn begin_load(&mut self) {
        if self.state == ViewState::Idle {
            self.state = ViewState::Loading;
        }
    }

    /// Show partial results of the first load
    pub fn reveal(&mut self, partial: &[Property]) {
        if self.state == ViewState::Loading {
            self.items = partial.to_vec();
        }
    }

    pub fn finish_load(&mut self, items: Vec<Property>) {
        debug!("Saved view loaded with {} homes", items.len());
        self.items = items;
        self.state = ViewState::Loaded;
    }

    /// Abandon a load that never completed
    pub fn abort_load(&mut self) {
        if self.state == ViewState::Loading {
            self.state = ViewState::Idle;
            self.items.clear();
        }
    }

    pub fn set_filter(&mut self, loved_only: bool) -> FilterChange {
        self.loved_only = loved_only;
        match self.state {
            ViewState::Idle => FilterChange::NeedsLoad,
            ViewState::Loading | ViewState::Loaded => FilterChange::Applied,
        }
    }

    pub fn visible(&self) -> Vec<Property> {
        filter_loved(&self.items, self.loved_only)
    }

    /// Everything loaded, ignoring the filter
    pub fn items(&self) -> &[Property] {
        &self.items
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.items.iter().find(|p| &p.id == id)
    }

    /// Flip loved on a loaded entry and return the new value.
    ///
    /// Unloving while the loved filter is on drops the entry from this view;
    /// it comes back as liked on the next refresh.
    pub fn toggle_loved(&mut self, id: &PropertyId) -> Option<bool> {
        let index = self.items.iter().position(|p| &p.id == id)?;
        let loved = !self.items[index].loved;
        self.items[index].loved = loved;
        if !loved && self.loved_only {
            self.items.remove(index);
        }
        Some(loved)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
