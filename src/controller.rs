//! Page controller.
//!
//! Owns every piece of page-lifetime state: the page, the navigation
//! container and its index, the current layout, the viewport, the visibility
//! observer, the reconciler and the idle timer. It is constructed once when
//! the page is ready and driven by scroll, resize, activation and tick calls.

use crate::config::Settings;
use crate::idle::{BarState, IdleHide};
use crate::nav::{EntryKind, NavContainer, NavIndex, build_navigation, toggle_responsive};
use crate::page::{Page, PageLayout, Region, RegionKey, layout};
use crate::reconciler::Reconciler;
use crate::scroll::{ActivationEvent, scroll_to_entry};
use crate::viewport::{Extent, IntersectionObserver, Viewport};
use std::time::{Duration, Instant};

/// Frame interval while a smooth scroll is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

pub struct PageController {
    page: Page,
    nav: NavContainer,
    index: NavIndex,
    layout: PageLayout,
    viewport: Viewport,
    observer: IntersectionObserver,
    reconciler: Reconciler,
    idle: IdleHide,
    active: Option<RegionKey>,
}

impl PageController {
    /// Build the navigation and start observing every Region.
    ///
    /// Nothing is measured until the first [`relayout`](Self::relayout).
    pub fn new(page: Page, settings: &Settings) -> Self {
        let mut nav = NavContainer::new();
        let index = build_navigation(&page, &mut nav);

        let mut observer = IntersectionObserver::new(settings.threshold);
        for region in page.regions() {
            observer.observe(region.key(), Extent::default());
        }

        log::info!(
            "page ready: {} region(s), threshold {}, idle delay {:?}",
            page.region_count(),
            settings.threshold,
            settings.idle_delay
        );

        Self {
            page,
            nav,
            index,
            layout: PageLayout::default(),
            viewport: Viewport::default(),
            observer,
            reconciler: Reconciler::new(settings.active_policy),
            idle: IdleHide::new(settings.idle_delay),
            active: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn nav(&self) -> &NavContainer {
        &self.nav
    }

    pub fn nav_index(&self) -> &NavIndex {
        &self.index
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bar_state(&self) -> BarState {
        self.idle.state()
    }

    /// Region whose navigation entry is selected.
    pub fn active_region(&self) -> Option<RegionKey> {
        self.active
    }

    /// Lay the page out for a new viewport size and re-measure visibility.
    pub fn relayout(&mut self, width: u16, height: u32, now: Instant) {
        self.layout = layout(&self.page, width);
        for &(key, extent) in self.layout.extents() {
            self.observer.set_extent(key, extent);
        }

        let moved = self.viewport.resize(height, self.layout.height());
        log::debug!(
            "relayout at {}x{}: content height {}",
            width,
            height,
            self.layout.height()
        );
        if moved {
            self.on_scroll(now);
        } else {
            self.observer.check(self.viewport.rect());
            self.flush_visibility();
        }
    }

    /// Scroll by `delta` rows. Returns true when the offset moved.
    pub fn scroll_by(&mut self, delta: i32, now: Instant) -> bool {
        let moved = self.viewport.scroll_by(delta);
        if moved {
            self.on_scroll(now);
        }
        moved
    }

    /// Jump to an absolute offset (clamped). Returns true when it moved.
    pub fn scroll_to(&mut self, offset: u32, now: Instant) -> bool {
        let moved = self.viewport.set_scroll_top(offset);
        if moved {
            self.on_scroll(now);
        }
        moved
    }

    /// Activate a navigation entry the way a click would.
    ///
    /// Link entries start a smooth scroll; the expand entry flips the
    /// responsive layout class. Returns false when nothing happened.
    pub fn activate(&mut self, entry: usize, now: Instant) -> bool {
        let kind = match self.nav.entry(entry) {
            Some(e) => e.kind.clone(),
            None => return false,
        };

        match kind {
            EntryKind::Expand => {
                toggle_responsive(&mut self.nav);
                true
            }
            EntryKind::Link { .. } => {
                let mut event = ActivationEvent::new(entry);
                scroll_to_entry(
                    &mut event,
                    &self.page,
                    &self.nav,
                    &self.layout,
                    &mut self.viewport,
                    now,
                )
            }
        }
    }

    /// Advance time: step any smooth scroll, fire the idle timer and deliver
    /// pending visibility batches.
    pub fn tick(&mut self, now: Instant) {
        if self.viewport.advance(now) {
            self.on_scroll(now);
        }
        if self.idle.poll(now) {
            self.nav.set_visible(false);
        }
        self.flush_visibility();
    }

    /// How long the caller may wait before the next [`tick`](Self::tick) is due.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        if self.viewport.is_animating() {
            return Some(ANIMATION_FRAME);
        }
        self.idle.time_until_hide(now)
    }

    /// Detach a Region from the page. Its navigation entry stays in place but
    /// no longer resolves.
    pub fn remove_region(&mut self, key: RegionKey, now: Instant) -> Option<Region> {
        let removed = self.page.remove_region(key)?;
        self.observer.unobserve(key);
        self.reconciler.forget(key);
        self.relayout(self.layout.width, self.viewport.height(), now);
        self.active = self
            .reconciler
            .apply(&[], &mut self.page, &mut self.nav, &self.index);
        Some(removed)
    }

    fn on_scroll(&mut self, now: Instant) {
        self.idle.on_scroll(now);
        self.nav.set_visible(true);
        self.observer.check(self.viewport.rect());
        self.flush_visibility();
    }

    fn flush_visibility(&mut self) {
        if let Some(active) =
            self.reconciler
                .drain(&mut self.observer, &mut self.page, &mut self.nav, &self.index)
        {
            self.active = active;
        }
    }
}
