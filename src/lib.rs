//! # sectionnav
//!
//! A section navigation bar for markdown pages.
//!
//! The page is split into Regions at a chosen heading level. A navigation bar
//! is built with one link per Region plus an expand control. While the reader
//! scrolls, the entry for the Region that occupies the viewport is
//! highlighted; activating an entry smooth-scrolls to its Region; the bar
//! hides after a quiet period without scrolling and comes back on the next
//! scroll.
//!
//! ## Example
//!
//! ```rust
//! use sectionnav::{PageController, Settings, parse_markdown};
//! use std::time::Instant;
//!
//! let markdown = "\
//! ### Intro
//! Hello.
//!
//! ### Work
//! Things I made.
//! ";
//!
//! let page = parse_markdown(markdown, 2);
//! let mut controller = PageController::new(page, &Settings::default());
//! controller.relayout(60, 20, Instant::now());
//!
//! // Both sections plus the expand control
//! assert_eq!(controller.nav().len(), 3);
//! for entry in controller.nav().entries() {
//!     println!("{} -> {:?}", entry.label, entry.target());
//! }
//! ```

/// Configuration file and runtime settings.
pub mod config;

/// Page controller owning all page-lifetime state.
pub mod controller;

/// Idle-hide timer for the navigation bar.
pub mod idle;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Provides a flexible keybinding system that allows users to customize
/// keyboard shortcuts via configuration files.
pub mod keybindings;

/// Navigation entries, the container they live in and the builder.
pub mod nav;

/// In-memory presentation tree and its text layout.
pub mod page;

/// Parser module for markdown documents.
///
/// Turns markdown into a [`Page`] whose Regions start at a chosen heading level.
pub mod parser;

/// Keeps Region active classes and the selected entry in step with visibility.
pub mod reconciler;

/// Navigation link activation and smooth scrolling.
pub mod scroll;

/// TUI module for the interactive terminal interface.
pub mod tui;

/// Scroll position, smooth scroll animation and visibility observation.
pub mod viewport;

// Re-export commonly used types for convenience
pub use config::{Config, Settings};
pub use controller::PageController;
pub use nav::{EntryKind, NavContainer, NavEntry, NavIndex, build_navigation};
pub use page::{Page, Region, RegionKey, RegionSpec};
pub use parser::{parse_file, parse_markdown};
pub use reconciler::ActivePolicy;
pub use tui::App;
