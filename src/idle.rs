//! Idle-hide controller.
//!
//! The navigation bar is shown while the page scrolls and hidden once no
//! scroll event has arrived for the configured delay. There is at most one
//! outstanding timer; every scroll cancels it before arming a new one.

use std::time::{Duration, Instant};

/// Quiet period before the bar hides.
pub const DEFAULT_IDLE_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Visible,
    Hidden,
}

/// Armed hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimer {
    /// Increments every time a timer is armed.
    pub generation: u64,
    pub deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct IdleHide {
    delay: Duration,
    state: BarState,
    timer: Option<IdleTimer>,
    generation: u64,
}

impl Default for IdleHide {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_DELAY)
    }
}

impl IdleHide {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: BarState::Visible,
            timer: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> BarState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timer(&self) -> Option<IdleTimer> {
        self.timer
    }

    /// Show the bar and restart the quiet period.
    pub fn on_scroll(&mut self, now: Instant) {
        if let Some(old) = self.timer.take() {
            log::trace!("cancelled idle timer #{}", old.generation);
        }
        self.state = BarState::Visible;
        self.generation += 1;
        self.timer = Some(IdleTimer {
            generation: self.generation,
            deadline: now + self.delay,
        });
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns true when this call hid the bar.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if now >= timer.deadline => {
                self.timer = None;
                self.state = BarState::Hidden;
                log::debug!("idle timer #{} fired; hiding navigation", timer.generation);
                true
            }
            _ => false,
        }
    }

    /// Time left before the armed timer fires.
    pub fn time_until_hide(&self, now: Instant) -> Option<Duration> {
        self.timer
            .map(|timer| timer.deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_visible_without_timer() {
        let mut idle = IdleHide::default();
        assert_eq!(idle.state(), BarState::Visible);
        assert!(idle.timer().is_none());
        assert!(!idle.poll(Instant::now() + ms(60_000)));
        assert_eq!(idle.state(), BarState::Visible);
    }

    #[test]
    fn test_hides_after_quiet_period() {
        let t0 = Instant::now();
        let mut idle = IdleHide::default();
        idle.on_scroll(t0);

        assert!(!idle.poll(t0 + ms(4999)));
        assert_eq!(idle.state(), BarState::Visible);
        assert!(idle.poll(t0 + ms(5000)));
        assert_eq!(idle.state(), BarState::Hidden);
        // Fires once
        assert!(!idle.poll(t0 + ms(10_000)));
    }

    #[test]
    fn test_scroll_before_deadline_resets_timer() {
        let t0 = Instant::now();
        let mut idle = IdleHide::default();
        idle.on_scroll(t0);
        idle.on_scroll(t0 + ms(4999));

        assert!(!idle.poll(t0 + ms(5000)));
        assert_eq!(idle.state(), BarState::Visible);
        assert_eq!(idle.time_until_hide(t0 + ms(5000)), Some(ms(4999)));
        assert!(idle.poll(t0 + ms(9999)));
    }

    #[test]
    fn test_only_one_timer_outstanding() {
        let t0 = Instant::now();
        let mut idle = IdleHide::default();
        idle.on_scroll(t0);
        let first = idle.timer().unwrap();
        idle.on_scroll(t0 + ms(100));
        let second = idle.timer().unwrap();

        assert!(second.generation > first.generation);
        assert_eq!(second.deadline, t0 + ms(5100));
    }

    #[test]
    fn test_scroll_shows_hidden_bar() {
        let t0 = Instant::now();
        let mut idle = IdleHide::new(ms(10));
        idle.on_scroll(t0);
        idle.poll(t0 + ms(10));
        assert_eq!(idle.state(), BarState::Hidden);

        idle.on_scroll(t0 + ms(20));
        assert_eq!(idle.state(), BarState::Visible);
    }
}
