//! Default keybindings for sectionnav
//!
//! Used when no user configuration is provided. Uses keybinds-rs key string
//! syntax.

use super::{Action, KeybindingMode, Keybindings};

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();
    add_normal_mode(&mut kb);
    add_help_mode(&mut kb);
    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_normal_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Normal;

    // Scrolling
    bind(kb, Normal, "j", ScrollDown);
    bind(kb, Normal, "Down", ScrollDown);
    bind(kb, Normal, "k", ScrollUp);
    bind(kb, Normal, "Up", ScrollUp);
    bind(kb, Normal, "d", PageDown);
    bind(kb, Normal, "PageDown", PageDown);
    bind(kb, Normal, "u", PageUp);
    bind(kb, Normal, "PageUp", PageUp);
    bind(kb, Normal, "g", Top);
    bind(kb, Normal, "Home", Top);
    bind(kb, Normal, "G", Bottom);
    bind(kb, Normal, "End", Bottom);

    // Navigation bar
    bind(kb, Normal, "Tab", NextEntry);
    bind(kb, Normal, "l", NextEntry);
    bind(kb, Normal, "Right", NextEntry);
    bind(kb, Normal, "Shift+Tab", PreviousEntry);
    bind(kb, Normal, "h", PreviousEntry);
    bind(kb, Normal, "Left", PreviousEntry);
    bind(kb, Normal, "Enter", ActivateEntry);
    bind(kb, Normal, "Space", ActivateEntry);
    bind(kb, Normal, "e", ToggleResponsive);

    // Numbered sections
    bind(kb, Normal, "1", ActivateEntry1);
    bind(kb, Normal, "2", ActivateEntry2);
    bind(kb, Normal, "3", ActivateEntry3);
    bind(kb, Normal, "4", ActivateEntry4);
    bind(kb, Normal, "5", ActivateEntry5);
    bind(kb, Normal, "6", ActivateEntry6);
    bind(kb, Normal, "7", ActivateEntry7);
    bind(kb, Normal, "8", ActivateEntry8);
    bind(kb, Normal, "9", ActivateEntry9);

    bind(kb, Normal, "?", ToggleHelp);
    bind(kb, Normal, "q", Quit);
    bind(kb, Normal, "Ctrl+c", Quit);
}

fn add_help_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Help;

    bind(kb, Help, "j", HelpScrollDown);
    bind(kb, Help, "Down", HelpScrollDown);
    bind(kb, Help, "k", HelpScrollUp);
    bind(kb, Help, "Up", HelpScrollUp);
    bind(kb, Help, "?", ToggleHelp);
    bind(kb, Help, "Escape", ToggleHelp);
    bind(kb, Help, "q", Quit);
    bind(kb, Help, "Ctrl+c", Quit);
}
