//! Scroll navigator.
//!
//! Link entries do not jump to their anchor. Activation is intercepted and
//! turned into a smooth scroll that brings the target Region to the top of
//! the viewport.

use crate::nav::NavContainer;
use crate::page::{Page, PageLayout, RegionKey};
use crate::viewport::Viewport;
use std::time::Instant;

/// Activation of a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEvent {
    pub entry: usize,
    default_prevented: bool,
}

impl ActivationEvent {
    pub fn new(entry: usize) -> Self {
        Self {
            entry,
            default_prevented: false,
        }
    }

    /// Suppress the instant jump-to-anchor.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Resolve a `#anchor` target to a Region on the page.
pub fn resolve_target(page: &Page, target: &str) -> Option<RegionKey> {
    let anchor = target.strip_prefix('#').unwrap_or(target);
    page.find_by_anchor(anchor).map(|r| r.key())
}

/// Handle activation of a link entry.
///
/// Returns false, leaving every piece of state untouched apart from the
/// event's default flag, when the entry has no target or the target is not on
/// the page.
pub fn scroll_to_entry(
    event: &mut ActivationEvent,
    page: &Page,
    nav: &NavContainer,
    layout: &PageLayout,
    viewport: &mut Viewport,
    now: Instant,
) -> bool {
    event.prevent_default();

    let Some(target) = nav.entry(event.entry).and_then(|e| e.target()) else {
        return false;
    };
    let Some(region) = resolve_target(page, target) else {
        log::warn!("navigation target '{}' does not resolve to a region", target);
        return false;
    };
    let Some(extent) = layout.extent(region) else {
        log::warn!("region for '{}' has not been laid out", target);
        return false;
    };

    log::debug!("smooth scroll to '{}' at row {}", target, extent.top);
    viewport.start_smooth_scroll(extent.top, now);
    true
}
