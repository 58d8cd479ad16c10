//! Navigation builder.
//!
//! Synthesizes one link entry per Region, in document order, followed by the
//! expand control. The entries are collected into a fragment first and then
//! inserted into the container in one operation.

use super::{NavContainer, NavEntry, NavIndex};
use crate::page::{ClassList, EXPAND_CLASS, LINK_CLASS, Page};

/// Build the navigation list for `page` into `container`.
///
/// A Region without an identifier gets an entry with an empty target; a Region
/// without a label gets an entry with empty text. Neither stops the build.
pub fn build_navigation(page: &Page, container: &mut NavContainer) -> NavIndex {
    let offset = container.len();
    let mut index = NavIndex::default();
    let mut fragment = Vec::with_capacity(page.region_count() + 1);

    for region in page.regions() {
        if region.anchor.is_empty() || region.label.is_empty() {
            log::warn!(
                "region {} is missing {}; building entry anyway",
                region.key().index(),
                if region.anchor.is_empty() { "an identifier" } else { "a label" }
            );
        }

        let target = if region.anchor.is_empty() {
            String::new()
        } else {
            format!("#{}", region.anchor)
        };

        index.insert(region.key(), offset + fragment.len());
        fragment.push(NavEntry::link(
            &region.label,
            target,
            region.key(),
            ClassList::from_names([LINK_CLASS]),
        ));
    }

    fragment.push(NavEntry::expand(ClassList::from_names([
        EXPAND_CLASS,
        LINK_CLASS,
    ])));

    log::debug!("built navigation with {} entries", fragment.len());
    container.append_batch(fragment);
    index
}
