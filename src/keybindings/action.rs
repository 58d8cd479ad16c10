//! Action definitions for keybindings
//!
//! This module defines all bindable actions in sectionnav.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in sectionnav
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Scrolling ===
    /// Scroll the page down one row
    ScrollDown,
    /// Scroll the page up one row
    ScrollUp,
    /// Scroll down by half a screen
    PageDown,
    /// Scroll up by half a screen
    PageUp,
    /// Jump to the top of the page
    Top,
    /// Jump to the bottom of the page
    Bottom,

    // === Navigation bar ===
    /// Move keyboard focus to the next entry
    NextEntry,
    /// Move keyboard focus to the previous entry
    PreviousEntry,
    /// Activate the focused entry
    ActivateEntry,
    /// Flip the responsive (stacked) navigation layout
    ToggleResponsive,

    // === Jump to Entry by Number ===
    ActivateEntry1,
    ActivateEntry2,
    ActivateEntry3,
    ActivateEntry4,
    ActivateEntry5,
    ActivateEntry6,
    ActivateEntry7,
    ActivateEntry8,
    ActivateEntry9,

    // === Help ===
    /// Toggle help popup
    ToggleHelp,
    /// Scroll help popup down
    HelpScrollDown,
    /// Scroll help popup up
    HelpScrollUp,

    // === Application ===
    /// Quit the application
    Quit,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::ScrollDown => "Scroll down",
            Action::ScrollUp => "Scroll up",
            Action::PageDown => "Half page down",
            Action::PageUp => "Half page up",
            Action::Top => "Go to top",
            Action::Bottom => "Go to bottom",

            Action::NextEntry => "Focus next nav entry",
            Action::PreviousEntry => "Focus previous nav entry",
            Action::ActivateEntry => "Activate focused entry",
            Action::ToggleResponsive => "Toggle stacked navigation",

            Action::ActivateEntry1 => "Go to section 1",
            Action::ActivateEntry2 => "Go to section 2",
            Action::ActivateEntry3 => "Go to section 3",
            Action::ActivateEntry4 => "Go to section 4",
            Action::ActivateEntry5 => "Go to section 5",
            Action::ActivateEntry6 => "Go to section 6",
            Action::ActivateEntry7 => "Go to section 7",
            Action::ActivateEntry8 => "Go to section 8",
            Action::ActivateEntry9 => "Go to section 9",

            Action::ToggleHelp => "Toggle help",
            Action::HelpScrollDown => "Scroll help down",
            Action::HelpScrollUp => "Scroll help up",

            Action::Quit => "Quit",
        }
    }

    /// Get the category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::ScrollDown
            | Action::ScrollUp
            | Action::PageDown
            | Action::PageUp
            | Action::Top
            | Action::Bottom => "Scrolling",

            Action::NextEntry
            | Action::PreviousEntry
            | Action::ActivateEntry
            | Action::ToggleResponsive => "Navigation",

            Action::ActivateEntry1
            | Action::ActivateEntry2
            | Action::ActivateEntry3
            | Action::ActivateEntry4
            | Action::ActivateEntry5
            | Action::ActivateEntry6
            | Action::ActivateEntry7
            | Action::ActivateEntry8
            | Action::ActivateEntry9 => "Sections",

            Action::ToggleHelp | Action::HelpScrollDown | Action::HelpScrollUp => "Help",

            Action::Quit => "Application",
        }
    }

    /// Zero-based entry index for the numbered jump actions
    pub fn entry_number(&self) -> Option<usize> {
        match self {
            Action::ActivateEntry1 => Some(0),
            Action::ActivateEntry2 => Some(1),
            Action::ActivateEntry3 => Some(2),
            Action::ActivateEntry4 => Some(3),
            Action::ActivateEntry5 => Some(4),
            Action::ActivateEntry6 => Some(5),
            Action::ActivateEntry7 => Some(6),
            Action::ActivateEntry8 => Some(7),
            Action::ActivateEntry9 => Some(8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_action_is_described() {
        for action in Action::iter() {
            assert!(!action.description().is_empty());
            assert!(!action.category().is_empty());
        }
    }

    #[test]
    fn test_entry_numbers() {
        assert_eq!(Action::ActivateEntry1.entry_number(), Some(0));
        assert_eq!(Action::ActivateEntry9.entry_number(), Some(8));
        assert_eq!(Action::Quit.entry_number(), None);
    }

    #[test]
    fn test_parse_from_string() {
        assert_eq!("ToggleResponsive".parse::<Action>(), Ok(Action::ToggleResponsive));
    }
}
