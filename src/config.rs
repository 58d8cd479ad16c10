use crate::keybindings::{Keybindings, KeybindingsConfig};
use crate::reconciler::ActivePolicy;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Fraction of a section that must be on screen for it to count as in view
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Quiet period before the navigation bar hides, in milliseconds
    #[serde(default = "default_idle_delay_ms")]
    pub idle_delay_ms: u64,

    /// Heading level that starts a section (1-6)
    #[serde(default = "default_section_level")]
    pub section_level: usize,

    /// "exclusive" (one active section) or "mirror" (every visible section)
    #[serde(default)]
    pub active_policy: ActivePolicy,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            idle_delay_ms: default_idle_delay_ms(),
            section_level: default_section_level(),
            active_policy: ActivePolicy::default(),
        }
    }
}

fn default_threshold() -> f32 {
    0.8
}

fn default_idle_delay_ms() -> u64 {
    5000
}

fn default_section_level() -> usize {
    2
}

/// Color overrides for the navigation bar and section markers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_marker: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_fg: Option<ColorValue>,
}

/// Color value that can be specified in multiple formats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Anything ratatui can parse: "cyan", "light-blue", "#ff8800", "235"
    Named(String),
    /// RGB color { rgb = [r, g, b] }
    Rgb { rgb: [u8; 3] },
}

impl ColorValue {
    /// Convert to ratatui Color
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorValue::Named(name) => Color::from_str(name).ok(),
            ColorValue::Rgb { rgb } => Some(Color::Rgb(rgb[0], rgb[1], rgb[2])),
        }
    }
}

/// Runtime settings derived from the config file and command line
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub threshold: f32,
    pub idle_delay: Duration,
    pub section_level: usize,
    pub active_policy: ActivePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        NavigationConfig::default().settings()
    }
}

impl Settings {
    /// Clamp values into their usable ranges
    pub fn validated(mut self) -> Self {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            log::warn!(
                "threshold {} is outside (0, 1]; using {}",
                self.threshold,
                default_threshold()
            );
            self.threshold = default_threshold();
        }
        self.section_level = self.section_level.clamp(1, 6);
        self
    }
}

/// Values given on the command line, applied on top of the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub threshold: Option<f32>,
    pub idle_delay_ms: Option<u64>,
    pub section_level: Option<usize>,
    pub active_policy: Option<ActivePolicy>,
}

impl Settings {
    /// Replace every value present in `overrides`, then re-validate
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(threshold) = overrides.threshold {
            self.threshold = threshold;
        }
        if let Some(ms) = overrides.idle_delay_ms {
            self.idle_delay = Duration::from_millis(ms);
        }
        if let Some(level) = overrides.section_level {
            self.section_level = level;
        }
        if let Some(policy) = overrides.active_policy {
            self.active_policy = policy;
        }
        self.validated()
    }
}

impl NavigationConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            threshold: self.threshold,
            idle_delay: Duration::from_millis(self.idle_delay_ms),
            section_level: self.section_level,
            active_policy: self.active_policy,
        }
        .validated()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/sectionnav/config.toml
    /// - Linux: ~/.config/sectionnav/config.toml
    /// - Windows: %APPDATA%/sectionnav/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sectionnav").join("config.toml"))
    }

    /// Load config from the platform path.
    ///
    /// A missing file gives the defaults. An invalid file also gives the
    /// defaults, plus a warning for the caller to show.
    pub fn load() -> (Self, Option<String>) {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => (Self::default(), None),
        }
    }

    /// Load config from `path`, falling back to defaults
    pub fn load_or_default(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => {
                let warning = format!("{}: {}; falling back to defaults", path.display(), e);
                log::warn!("{}", warning);
                (Self::default(), Some(warning))
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn settings(&self) -> Settings {
        self.navigation.settings()
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}
