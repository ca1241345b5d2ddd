//! Category picking state for the dashboard's category browser.

use crate::core::dashboard::CategoryTotal;
use std::collections::BTreeSet;

/// Tracks which categories the user picked and the current search text.
///
/// Every transition is pure: it returns the next state and leaves the
/// current one untouched, so a caller can keep or discard intermediate
/// states freely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorySelection {
    selected: BTreeSet<String>,
    search: String,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The picked category names. Empty means no category filter.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Adds the name to the selection, or removes it when already picked.
    pub fn toggle(&self, name: &str) -> Self {
        let mut next = self.clone();
        if !next.selected.remove(name) {
            next.selected.insert(name.to_string());
        }
        next
    }

    /// Replaces the selection with every given name.
    pub fn select_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut next = self.clone();
        next.selected = names.into_iter().map(str::to_string).collect();
        next
    }

    pub fn clear(&self) -> Self {
        let mut next = self.clone();
        next.selected.clear();
        next
    }

    pub fn with_search(&self, search: &str) -> Self {
        let mut next = self.clone();
        next.search = search.to_string();
        next
    }

    /// Case-insensitive substring match against the search text. An empty
    /// search matches every name.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.search.to_lowercase())
    }

    /// The categories visible under the current search, in their given order.
    pub fn visible<'a>(&self, categories: &'a [CategoryTotal]) -> Vec<&'a CategoryTotal> {
        categories
            .iter()
            .filter(|category| self.matches(&category.name))
            .collect()
    }
}
