//! Customizable keybindings for sectionnav
//!
//! Keybindings are configured in TOML format, organized by mode:
//!
//! ```toml
//! [keybindings.Normal]
//! "n" = "NextEntry"
//! "Ctrl+d" = "PageDown"
//!
//! [keybindings.Help]
//! "Escape" = "ToggleHelp"
//! ```

mod action;
mod defaults;

pub use action::Action;

use crossterm::event::KeyEvent;
use keybinds::Keybinds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modes that have their own keybinding sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum KeybindingMode {
    /// Reading the page
    Normal,
    /// Help popup is shown
    Help,
}

/// Complete keybinding configuration, one keybinds-rs dispatcher per mode
#[derive(Debug)]
pub struct Keybindings {
    bindings: HashMap<KeybindingMode, Keybinds<Action>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        defaults::default_keybindings()
    }
}

impl Keybindings {
    /// Create empty keybindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Get the action for a key event in a specific mode
    pub fn dispatch(&mut self, mode: KeybindingMode, event: KeyEvent) -> Option<Action> {
        self.bindings
            .get_mut(&mode)
            .and_then(|kb| kb.dispatch(event).copied())
    }

    /// Reset any in-progress key sequences (call when switching modes)
    pub fn reset_sequences(&mut self) {
        for kb in self.bindings.values_mut() {
            kb.reset();
        }
    }

    /// Bind a key sequence to an action in a mode
    pub fn bind(
        &mut self,
        mode: KeybindingMode,
        key_sequence: &str,
        action: Action,
    ) -> Result<(), keybinds::Error> {
        self.bindings
            .entry(mode)
            .or_default()
            .bind(key_sequence, action)
    }

    /// Get all keys bound to an action in a mode
    pub fn keys_for_action(&self, mode: KeybindingMode, action: Action) -> Vec<String> {
        self.bindings
            .get(&mode)
            .map(|kb| {
                kb.as_slice()
                    .iter()
                    .filter(|bind| bind.action == action)
                    .map(|bind| format_key_sequence(&bind.seq))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Help entries for a mode, grouped by category then description
    pub fn help_entries(&self, mode: KeybindingMode) -> Vec<(Action, Vec<String>)> {
        let mut action_keys: HashMap<Action, Vec<String>> = HashMap::new();

        if let Some(kb) = self.bindings.get(&mode) {
            for bind in kb.as_slice() {
                action_keys
                    .entry(bind.action)
                    .or_default()
                    .push(format_key_sequence(&bind.seq));
            }
        }

        let mut entries: Vec<_> = action_keys.into_iter().collect();
        entries.sort_by(|a, b| {
            a.0.category()
                .cmp(b.0.category())
                .then(a.0.description().cmp(b.0.description()))
        });
        entries
    }

    /// Apply user overrides on top of these bindings.
    ///
    /// Every valid key is bound; invalid keys are skipped and returned as
    /// messages, sorted so the output does not depend on map order.
    pub fn merge(&mut self, other: &KeybindingsConfig) -> Vec<String> {
        let mut errors = Vec::new();
        for (mode, mode_bindings) in &other.0 {
            let kb = self.bindings.entry(*mode).or_default();
            for (key_str, action) in mode_bindings {
                if let Err(e) = kb.bind(key_str, *action) {
                    errors.push(format!("Invalid key '{}' in {:?} mode: {}", key_str, mode, e));
                }
            }
        }
        errors.sort();
        errors
    }
}

fn format_key_sequence(seq: &keybinds::KeySeq) -> String {
    seq.as_slice()
        .iter()
        .map(format_key_input)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_key_input(input: &keybinds::KeyInput) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mods = input.mods();
    if mods.contains(keybinds::Mods::CTRL) {
        parts.push("C".to_string());
    }
    if mods.contains(keybinds::Mods::ALT) {
        parts.push("A".to_string());
    }
    if mods.contains(keybinds::Mods::SHIFT) {
        parts.push("S".to_string());
    }
    parts.push(format_key(input.key()));
    parts.join("-")
}

fn format_key(key: keybinds::Key) -> String {
    use keybinds::Key;
    match key {
        Key::Char(' ') => "Spc".to_string(),
        Key::Char(c) => c.to_string(),
        Key::Enter => "Ret".to_string(),
        Key::Esc => "Esc".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Up => "↑".to_string(),
        Key::Down => "↓".to_string(),
        Key::Left => "←".to_string(),
        Key::Right => "→".to_string(),
        Key::PageUp => "PgU".to_string(),
        Key::PageDown => "PgD".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        _ => "?".to_string(),
    }
}

/// Configuration format for keybindings (string keys for TOML compatibility)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeybindingsConfig(pub HashMap<KeybindingMode, HashMap<String, Action>>);

impl KeybindingsConfig {
    /// Convert to Keybindings, using defaults for any missing bindings
    pub fn to_keybindings(&self) -> Keybindings {
        self.to_keybindings_reporting().0
    }

    /// Like [`to_keybindings`](Self::to_keybindings), also returning one
    /// message per override that could not be bound
    pub fn to_keybindings_reporting(&self) -> (Keybindings, Vec<String>) {
        let mut keybindings = Keybindings::default();
        let errors = keybindings.merge(self);
        for e in &errors {
            log::warn!("ignoring keybinding override: {}", e);
        }
        (keybindings, errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
