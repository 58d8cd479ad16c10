//! Viewport geometry and visibility observation.
//!
//! [`Viewport`] owns the scroll offset, including programmatic smooth
//! scrolling. [`IntersectionObserver`] measures how much of each watched
//! Region is inside the viewport and reports threshold crossings in batches.
//! Consumers only depend on [`VisibilitySource`], so synthetic batches can be
//! fed in place of real geometry.

use crate::page::RegionKey;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Duration of a programmatic smooth scroll.
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(300);

/// Vertical span in rendered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub top: u32,
    pub height: u32,
}

impl Extent {
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// Fraction of `self` that lies inside `view`.
    pub fn visible_ratio(&self, view: Extent) -> f32 {
        if self.height == 0 {
            let inside = self.top >= view.top && self.top <= view.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        let start = self.top.max(view.top);
        let end = self.bottom().min(view.bottom());
        let visible = end.saturating_sub(start);
        visible as f32 / self.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SmoothScroll {
    from: u32,
    to: u32,
    started: Instant,
}

impl SmoothScroll {
    fn offset_at(&self, now: Instant) -> (u32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= SMOOTH_SCROLL_DURATION {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / SMOOTH_SCROLL_DURATION.as_secs_f32();
        let eased = ease_in_out_cubic(t);
        let from = self.from as f32;
        let to = self.to as f32;
        ((from + (to - from) * eased).round() as u32, false)
    }
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// The scrollable window onto the page.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll_top: u32,
    height: u32,
    content_height: u32,
    animation: Option<SmoothScroll>,
}

impl Viewport {
    pub fn new(height: u32, content_height: u32) -> Self {
        Self {
            scroll_top: 0,
            height,
            content_height,
            animation: None,
        }
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    pub fn max_scroll(&self) -> u32 {
        self.content_height.saturating_sub(self.height)
    }

    pub fn rect(&self) -> Extent {
        Extent {
            top: self.scroll_top,
            height: self.height,
        }
    }

    /// Update dimensions after a relayout, clamping the offset.
    pub fn resize(&mut self, height: u32, content_height: u32) -> bool {
        self.height = height;
        self.content_height = content_height;
        let clamped = self.scroll_top.min(self.max_scroll());
        self.set_offset(clamped)
    }

    fn set_offset(&mut self, offset: u32) -> bool {
        let offset = offset.min(self.max_scroll());
        if offset == self.scroll_top {
            return false;
        }
        self.scroll_top = offset;
        true
    }

    /// Jump to `offset` immediately, cancelling any smooth scroll.
    ///
    /// Returns true when the offset moved, i.e. a scroll event happened.
    pub fn set_scroll_top(&mut self, offset: u32) -> bool {
        self.animation = None;
        self.set_offset(offset)
    }

    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.set_scroll_top(target)
    }

    /// Begin animating towards `target` from the current offset.
    pub fn start_smooth_scroll(&mut self, target: u32, now: Instant) {
        let to = target.min(self.max_scroll());
        if to == self.scroll_top {
            self.animation = None;
            return;
        }
        self.animation = Some(SmoothScroll {
            from: self.scroll_top,
            to,
            started: now,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Step the smooth scroll. Returns true when the offset moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let (offset, done) = animation.offset_at(now);
        if done {
            self.animation = None;
        }
        self.set_offset(offset)
    }
}

/// One threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityChange {
    pub region: RegionKey,
    /// Whether the Region is now at or past the threshold.
    pub visible: bool,
    pub ratio: f32,
}

impl VisibilityChange {
    pub fn new(region: RegionKey, visible: bool) -> Self {
        Self {
            region,
            visible,
            ratio: if visible { 1.0 } else { 0.0 },
        }
    }
}

/// Anything that produces batches of visibility changes.
pub trait VisibilitySource {
    /// Next pending batch, or `None` when nothing is queued.
    fn next_batch(&mut self) -> Option<Vec<VisibilityChange>>;
}

impl VisibilitySource for VecDeque<Vec<VisibilityChange>> {
    fn next_batch(&mut self) -> Option<Vec<VisibilityChange>> {
        self.pop_front()
    }
}

#[derive(Debug, Clone)]
struct Target {
    region: RegionKey,
    extent: Extent,
    /// Last reported state; `None` until the first check after observing.
    past: Option<bool>,
}

/// Geometry-driven visibility observer.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    threshold: f32,
    targets: Vec<Target>,
    pending: VecDeque<Vec<VisibilityChange>>,
}

impl IntersectionObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            targets: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start watching a Region. Its current state is reported on the next
    /// check regardless of whether it crossed anything.
    pub fn observe(&mut self, region: RegionKey, extent: Extent) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.region == region) {
            target.extent = extent;
            return;
        }
        self.targets.push(Target {
            region,
            extent,
            past: None,
        });
    }

    pub fn unobserve(&mut self, region: RegionKey) {
        self.targets.retain(|t| t.region != region);
    }

    pub fn set_extent(&mut self, region: RegionKey, extent: Extent) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.region == region) {
            target.extent = extent;
        }
    }

    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    /// Measure every target against `view` and queue a batch if any crossed.
    pub fn check(&mut self, view: Extent) {
        let mut batch = Vec::new();
        for target in &mut self.targets {
            let ratio = target.extent.visible_ratio(view);
            let past = ratio >= self.threshold;
            if target.past != Some(past) {
                target.past = Some(past);
                batch.push(VisibilityChange {
                    region: target.region,
                    visible: past,
                    ratio,
                });
            }
        }
        if !batch.is_empty() {
            log::trace!("observer queued batch of {} change(s)", batch.len());
            self.pending.push_back(batch);
        }
    }
}

impl VisibilitySource for IntersectionObserver {
    fn next_batch(&mut self) -> Option<Vec<VisibilityChange>> {
        self.pending.pop_front()
    }
}
