use crate::config::{Config, Settings};
use crate::controller::PageController;
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::nav::EntryKind;
use crate::page::Page;
use crate::tui::theme::Theme;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Rows moved per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// How long a status message stays on screen
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

pub struct App {
    pub controller: PageController,
    pub filename: String,
    pub theme: Theme,
    keybindings: Keybindings,

    /// Entry highlighted for keyboard activation
    pub focused_entry: Option<usize>,
    pub show_help: bool,
    pub help_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,

    /// Clickable areas of the nav entries from the last frame
    pub nav_hits: Vec<(Rect, usize)>,
    /// Page text area from the last frame (width, height)
    page_size: Option<(u16, u16)>,
}

impl App {
    /// Bad keybinding overrides are reported in the status bar
    pub fn new(page: Page, filename: String, config: &Config, settings: &Settings) -> Self {
        let (keybindings, problems) = config.keybindings.to_keybindings_reporting();
        let mut app = Self {
            controller: PageController::new(page, settings),
            filename,
            theme: Theme::default().with_overrides(&config.theme),
            keybindings,
            focused_entry: None,
            show_help: false,
            help_scroll: 0,
            should_quit: false,
            status_message: None,
            nav_hits: Vec::new(),
            page_size: None,
        };
        if let Some(first) = problems.first() {
            app.notify(format!("⚠ {}", first), Instant::now());
        }
        app
    }

    fn mode(&self) -> KeybindingMode {
        if self.show_help {
            KeybindingMode::Help
        } else {
            KeybindingMode::Normal
        }
    }

    pub fn keybindings(&self) -> &Keybindings {
        &self.keybindings
    }

    /// Re-lay the page out when the text area changed size
    pub fn resize_page(&mut self, width: u16, height: u16, now: Instant) {
        if self.page_size == Some((width, height)) {
            return;
        }
        self.page_size = Some((width, height));
        self.controller.relayout(width, u32::from(height), now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        if let Some((_, shown_at)) = &self.status_message {
            if now.duration_since(*shown_at) >= STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    /// Show a message in the status bar for a few seconds
    pub fn notify(&mut self, message: String, now: Instant) {
        self.status_message = Some((message, now));
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let mode = self.mode();
        if let Some(action) = self.keybindings.dispatch(mode, key) {
            self.apply_action(action, now);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.show_help {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.controller.scroll_by(WHEEL_STEP, now);
            }
            MouseEventKind::ScrollUp => {
                self.controller.scroll_by(-WHEEL_STEP, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                let hit = self
                    .nav_hits
                    .iter()
                    .find(|(area, _)| area.contains(position))
                    .map(|(_, entry)| *entry);
                if let Some(entry) = hit {
                    self.focused_entry = Some(entry);
                    self.activate(entry, now);
                }
            }
            _ => {}
        }
    }

    fn half_page(&self) -> i32 {
        (self.controller.viewport().height() / 2).max(1) as i32
    }

    pub fn apply_action(&mut self, action: Action, now: Instant) {
        if let Some(n) = action.entry_number() {
            self.activate_link_number(n, now);
            return;
        }

        match action {
            Action::ScrollDown => {
                self.controller.scroll_by(1, now);
            }
            Action::ScrollUp => {
                self.controller.scroll_by(-1, now);
            }
            Action::PageDown => {
                let step = self.half_page();
                self.controller.scroll_by(step, now);
            }
            Action::PageUp => {
                let step = self.half_page();
                self.controller.scroll_by(-step, now);
            }
            Action::Top => {
                self.controller.scroll_to(0, now);
            }
            Action::Bottom => {
                self.controller.scroll_to(u32::MAX, now);
            }
            Action::NextEntry => self.move_focus(1, now),
            Action::PreviousEntry => self.move_focus(-1, now),
            Action::ActivateEntry => match self.focused_entry {
                Some(entry) => self.activate(entry, now),
                None => self.move_focus(1, now),
            },
            Action::ToggleResponsive => {
                let expand = self.controller.nav().len().saturating_sub(1);
                self.activate(expand, now);
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.help_scroll = 0;
                self.keybindings.reset_sequences();
            }
            Action::HelpScrollDown => self.help_scroll = self.help_scroll.saturating_add(1),
            Action::HelpScrollUp => self.help_scroll = self.help_scroll.saturating_sub(1),
            Action::Quit => self.should_quit = true,
            _ => {}
        }
    }

    /// Activate the n-th link entry (zero-based), skipping the expand control
    fn activate_link_number(&mut self, n: usize, now: Instant) {
        let is_link = self
            .controller
            .nav()
            .entry(n)
            .is_some_and(|e| matches!(e.kind, EntryKind::Link { .. }));
        if is_link {
            self.focused_entry = Some(n);
            self.activate(n, now);
        }
    }

    fn move_focus(&mut self, delta: isize, now: Instant) {
        let len = self.controller.nav().len();
        if len == 0 {
            return;
        }
        let next = match self.focused_entry {
            Some(current) => (current as isize + delta).rem_euclid(len as isize) as usize,
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.focused_entry = Some(next);
        if let Some(entry) = self.controller.nav().entry(next) {
            let label = entry.label.clone();
            self.notify(format!("Focus: {}", label), now);
        }
    }

    fn activate(&mut self, entry: usize, now: Instant) {
        let label = match self.controller.nav().entry(entry) {
            Some(e) => e.label.clone(),
            None => return,
        };
        if !self.controller.activate(entry, now) {
            self.notify(format!("✗ '{}' is not on this page", label), now);
        }
    }

    /// Label of the section whose nav entry is selected
    pub fn active_label(&self) -> Option<&str> {
        let key = self.controller.active_region()?;
        self.controller.page().region(key).map(|r| r.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RegionSpec;

    fn app() -> App {
        let body: Vec<String> = (0..9).map(|i| format!("line {}", i)).collect();
        let page = Page::from_regions([
            RegionSpec::new("intro", "Intro").with_body(body.clone()),
            RegionSpec::new("work", "Work").with_body(body),
        ]);
        let config = Config::default();
        let mut app = App::new(page, "test.md".to_string(), &config, &config.settings());
        app.resize_page(60, 12, Instant::now());
        app
    }

    #[test]
    fn test_focus_wraps_around() {
        let now = Instant::now();
        let mut app = app();
        app.apply_action(Action::PreviousEntry, now);
        assert_eq!(app.focused_entry, Some(2));
        app.apply_action(Action::NextEntry, now);
        assert_eq!(app.focused_entry, Some(0));
    }

    #[test]
    fn test_numbered_jump_skips_expand() {
        let now = Instant::now();
        let mut app = app();
        app.apply_action(Action::ActivateEntry3, now);
        assert_eq!(app.focused_entry, None);
        assert!(!app.controller.nav().is_responsive());

        app.apply_action(Action::ActivateEntry2, now);
        assert_eq!(app.focused_entry, Some(1));
        assert!(app.controller.viewport().is_animating());
    }

    #[test]
    fn test_toggle_responsive_action() {
        let now = Instant::now();
        let mut app = app();
        app.apply_action(Action::ToggleResponsive, now);
        assert!(app.controller.nav().is_responsive());
        app.apply_action(Action::ToggleResponsive, now);
        assert!(!app.controller.nav().is_responsive());
    }

    #[test]
    fn test_click_on_entry_activates_it() {
        let now = Instant::now();
        let mut app = app();
        app.nav_hits = vec![(Rect::new(0, 1, 6, 1), 1)];
        app.handle_mouse(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 2,
                row: 1,
                modifiers: crossterm::event::KeyModifiers::NONE,
            },
            now,
        );
        assert_eq!(app.focused_entry, Some(1));
        assert!(app.controller.viewport().is_animating());
    }

    #[test]
    fn test_bottom_and_top() {
        let now = Instant::now();
        let mut app = app();
        app.apply_action(Action::Bottom, now);
        assert_eq!(
            app.controller.viewport().scroll_top(),
            app.controller.viewport().max_scroll()
        );
        assert_eq!(app.active_label(), Some("Work"));
        app.apply_action(Action::Top, now);
        assert_eq!(app.controller.viewport().scroll_top(), 0);
    }

    #[test]
    fn test_bad_keybinding_is_reported_in_status_bar() {
        let mut config = Config::default();
        let mut overrides = std::collections::HashMap::new();
        overrides.insert("Ctrl+Bogus+Nope".to_string(), Action::Quit);
        overrides.insert("x".to_string(), Action::Quit);
        config
            .keybindings
            .0
            .insert(KeybindingMode::Normal, overrides);

        let page = Page::from_regions([RegionSpec::new("intro", "Intro")]);
        let mut app = App::new(page, "x.md".to_string(), &config, &config.settings());
        let (message, _) = app.status_message.clone().unwrap();
        assert!(message.contains("Ctrl+Bogus+Nope"));

        // The valid override next to it still works
        let key = KeyEvent::new(
            crossterm::event::KeyCode::Char('x'),
            crossterm::event::KeyModifiers::NONE,
        );
        app.handle_key(key, Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_notify_expires() {
        let mut app = app();
        let now = Instant::now();
        app.notify("config: bad value".to_string(), now);
        app.tick(now + Duration::from_secs(1));
        assert!(app.status_message.is_some());
        app.tick(now + STATUS_TIMEOUT);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_help_toggle() {
        let now = Instant::now();
        let mut app = app();
        app.apply_action(Action::ToggleHelp, now);
        assert_eq!(app.mode(), KeybindingMode::Help);
        app.apply_action(Action::ToggleHelp, now);
        assert_eq!(app.mode(), KeybindingMode::Normal);
    }
}
