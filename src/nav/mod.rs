//! Navigation list model.
//!
//! The navigation container holds one link entry per Region plus a trailing
//! expand control. Entries are never removed once inserted.

mod builder;

pub use builder::build_navigation;

use crate::page::{ClassList, EXPAND_GLYPH, RESPONSIVE_CLASS, RegionKey, SELECTED_CLASS};
use serde::Serialize;
use std::collections::HashMap;

/// What activating an entry does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    /// Smooth-scrolls to `target` (`#` + the Region's identifier).
    Link { target: String, region: RegionKey },
    /// Flips the container's responsive layout class.
    Expand,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub label: String,
    #[serde(flatten)]
    pub kind: EntryKind,
    #[serde(skip)]
    pub classes: ClassList,
}

impl NavEntry {
    pub fn link(label: &str, target: String, region: RegionKey, classes: ClassList) -> Self {
        Self {
            label: label.to_string(),
            kind: EntryKind::Link { target, region },
            classes,
        }
    }

    pub fn expand(classes: ClassList) -> Self {
        Self {
            label: EXPAND_GLYPH.to_string(),
            kind: EntryKind::Expand,
            classes,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.classes.contains(SELECTED_CLASS)
    }

    /// Navigation target, `None` for the expand control.
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Link { target, .. } => Some(target),
            EntryKind::Expand => None,
        }
    }
}

/// The element that receives generated entries.
#[derive(Debug, Clone)]
pub struct NavContainer {
    entries: Vec<NavEntry>,
    pub classes: ClassList,
    visible: bool,
    batch_insertions: usize,
}

impl Default for NavContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl NavContainer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            classes: ClassList::new(),
            visible: true,
            batch_insertions: 0,
        }
    }

    /// Insert a whole fragment of entries in one operation.
    pub fn append_batch(&mut self, fragment: Vec<NavEntry>) {
        self.entries.extend(fragment);
        self.batch_insertions += 1;
    }

    /// Number of insert operations performed on the container so far.
    pub fn batch_insertions(&self) -> usize {
        self.batch_insertions
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn entry(&self, idx: usize) -> Option<&NavEntry> {
        self.entries.get(idx)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [NavEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the currently selected entry.
    pub fn selected(&self) -> Option<usize> {
        self.entries.iter().position(NavEntry::is_selected)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_responsive(&self) -> bool {
        self.classes.contains(RESPONSIVE_CLASS)
    }
}

/// Region → entry mapping recorded while building the navigation.
#[derive(Debug, Clone, Default)]
pub struct NavIndex {
    entries: HashMap<RegionKey, usize>,
}

impl NavIndex {
    pub(crate) fn insert(&mut self, region: RegionKey, entry: usize) {
        self.entries.insert(region, entry);
    }

    pub fn entry_for(&self, region: RegionKey) -> Option<usize> {
        self.entries.get(&region).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flip the responsive layout class on the container.
///
/// Returns whether the class is now present.
pub fn toggle_responsive(container: &mut NavContainer) -> bool {
    let on = container.classes.toggle(RESPONSIVE_CLASS);
    log::debug!("responsive navigation {}", if on { "on" } else { "off" });
    on
}
