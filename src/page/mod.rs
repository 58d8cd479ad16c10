//! In-memory presentation tree.
//!
//! A [`Page`] is an ordered list of items. Some of them are [`Region`]s, the
//! independently navigable sections that feed the navigation bar and are
//! observed for visibility. Everything else is plain prose that takes up
//! space in the layout but is never navigated to.

mod class_list;
pub mod layout;

pub use class_list::ClassList;
pub use layout::{LaidOutLine, LineKind, PageLayout, layout};

use serde::Serialize;

/// Class carried by a Region while it counts as in view.
pub const ACTIVE_CLASS: &str = "active";
/// Class carried by every link-type navigation entry.
pub const LINK_CLASS: &str = "menu__link";
/// Class carried by the navigation entry matching the active Region.
pub const SELECTED_CLASS: &str = "active-section";
/// Class carried by the expand control.
pub const EXPAND_CLASS: &str = "responsive__icon";
/// Layout class flipped on the navigation container by the expand control.
pub const RESPONSIVE_CLASS: &str = "responsive__nav";
/// Label of the expand control.
pub const EXPAND_GLYPH: &str = "+";

/// Stable identity of a Region within one page.
///
/// Keys are handed out in document order when the page is built and are never
/// reused, even after a Region is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RegionKey(usize);

impl RegionKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Raw region description as found in the source markup.
///
/// Either attribute may be missing; the page degrades to empty strings rather
/// than refusing to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSpec {
    pub anchor: Option<String>,
    pub label: Option<String>,
    pub body: Vec<String>,
}

impl RegionSpec {
    pub fn new(anchor: &str, label: &str) -> Self {
        Self {
            anchor: Some(anchor.to_string()),
            label: Some(label.to_string()),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<String>) -> Self {
        self.body = body;
        self
    }
}

/// One content section of the page.
#[derive(Debug, Clone)]
pub struct Region {
    key: RegionKey,
    /// Element identifier, empty when the markup did not provide one.
    pub anchor: String,
    /// Navigation label, used verbatim as the entry text.
    pub label: String,
    pub body: Vec<String>,
    pub classes: ClassList,
}

impl Region {
    pub fn key(&self) -> RegionKey {
        self.key
    }

    pub fn is_active(&self) -> bool {
        self.classes.contains(ACTIVE_CLASS)
    }

    pub fn set_active(&mut self, active: bool) {
        self.classes.set(ACTIVE_CLASS, active);
    }
}

/// Source item used to assemble a page.
#[derive(Debug, Clone)]
pub enum ItemSpec {
    Prose(Vec<String>),
    Region(RegionSpec),
}

#[derive(Debug, Clone)]
pub enum PageItem {
    Prose(Vec<String>),
    Region(Region),
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    items: Vec<PageItem>,
}

impl Page {
    /// Assemble a page, assigning Region keys in document order.
    pub fn from_items(items: impl IntoIterator<Item = ItemSpec>) -> Self {
        let mut next_key = 0;
        let items = items
            .into_iter()
            .map(|item| match item {
                ItemSpec::Prose(lines) => PageItem::Prose(lines),
                ItemSpec::Region(spec) => {
                    let key = RegionKey(next_key);
                    next_key += 1;
                    PageItem::Region(Region {
                        key,
                        anchor: spec.anchor.unwrap_or_default(),
                        label: spec.label.unwrap_or_default(),
                        body: spec.body,
                        classes: ClassList::new(),
                    })
                }
            })
            .collect();
        Self { items }
    }

    /// Convenience for pages made only of Regions.
    pub fn from_regions(regions: impl IntoIterator<Item = RegionSpec>) -> Self {
        Self::from_items(regions.into_iter().map(ItemSpec::Region))
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Regions in document order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Region(region) => Some(region),
            PageItem::Prose(_) => None,
        })
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.items.iter_mut().filter_map(|item| match item {
            PageItem::Region(region) => Some(region),
            PageItem::Prose(_) => None,
        })
    }

    pub fn region_count(&self) -> usize {
        self.regions().count()
    }

    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        self.regions().find(|r| r.key == key)
    }

    pub fn region_mut(&mut self, key: RegionKey) -> Option<&mut Region> {
        self.regions_mut().find(|r| r.key == key)
    }

    /// First Region whose element identifier equals `anchor`.
    pub fn find_by_anchor(&self, anchor: &str) -> Option<&Region> {
        if anchor.is_empty() {
            return None;
        }
        self.regions().find(|r| r.anchor == anchor)
    }

    /// Detach a Region from the page. Navigation entries pointing at it stay.
    pub fn remove_region(&mut self, key: RegionKey) -> Option<Region> {
        let pos = self
            .items
            .iter()
            .position(|item| matches!(item, PageItem::Region(r) if r.key == key))?;
        match self.items.remove(pos) {
            PageItem::Region(region) => Some(region),
            PageItem::Prose(_) => None,
        }
    }

    /// Last Region in document order that carries the active class.
    pub fn last_active(&self) -> Option<&Region> {
        self.regions().filter(|r| r.is_active()).last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        Page::from_items([
            ItemSpec::Prose(vec!["Title".to_string()]),
            ItemSpec::Region(RegionSpec::new("intro", "Intro")),
            ItemSpec::Region(RegionSpec::new("work", "Work")),
        ])
    }

    #[test]
    fn test_keys_follow_document_order() {
        let page = sample();
        let keys: Vec<_> = page.regions().map(|r| r.key().index()).collect();
        assert_eq!(keys, vec![0, 1]);
        assert_eq!(page.items().len(), 3);
    }

    #[test]
    fn test_missing_attributes_become_empty() {
        let page = Page::from_regions([RegionSpec::default()]);
        let region = page.regions().next().unwrap();
        assert_eq!(region.anchor, "");
        assert_eq!(region.label, "");
    }

    #[test]
    fn test_find_by_anchor() {
        let page = sample();
        assert_eq!(page.find_by_anchor("work").unwrap().label, "Work");
        assert!(page.find_by_anchor("missing").is_none());
        assert!(page.find_by_anchor("").is_none());
    }

    #[test]
    fn test_remove_region_keeps_other_keys() {
        let mut page = sample();
        let intro = page.regions().next().unwrap().key();
        let removed = page.remove_region(intro).unwrap();
        assert_eq!(removed.label, "Intro");
        assert!(page.region(intro).is_none());
        assert_eq!(page.regions().next().unwrap().key().index(), 1);
        assert!(page.remove_region(intro).is_none());
    }

    #[test]
    fn test_last_active_is_last_in_document_order() {
        let mut page = sample();
        for region in page.regions_mut() {
            region.set_active(true);
        }
        assert_eq!(page.last_active().unwrap().label, "Work");

        for region in page.regions_mut() {
            region.set_active(false);
        }
        assert!(page.last_active().is_none());
    }
}
