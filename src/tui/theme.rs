use crate::config::{ColorValue, ThemeConfig};
use ratatui::style::{Color, Modifier, Style};

/// Colors used by the terminal front end
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub nav_bg: Color,
    pub nav_fg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub active_marker: Color,
    pub heading_fg: Color,
    pub prose_fg: Color,
    pub title_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            nav_bg: Color::Rgb(30, 34, 42),
            nav_fg: Color::Rgb(200, 204, 212),
            selected_fg: Color::Rgb(20, 22, 28),
            selected_bg: Color::Rgb(102, 217, 239),
            active_marker: Color::Rgb(102, 217, 239),
            heading_fg: Color::Rgb(229, 192, 123),
            prose_fg: Color::Gray,
            title_fg: Color::Rgb(152, 195, 121),
            status_bg: Color::Rgb(40, 44, 52),
            status_fg: Color::Rgb(171, 178, 191),
        }
    }
}

impl Theme {
    /// Apply user color overrides; unparseable values keep the default
    pub fn with_overrides(mut self, config: &ThemeConfig) -> Self {
        fn apply(slot: &mut Color, value: &Option<ColorValue>) {
            if let Some(color) = value.as_ref().and_then(ColorValue::to_color) {
                *slot = color;
            }
        }

        apply(&mut self.nav_bg, &config.nav_bg);
        apply(&mut self.nav_fg, &config.nav_fg);
        apply(&mut self.selected_fg, &config.selected_fg);
        apply(&mut self.selected_bg, &config.selected_bg);
        apply(&mut self.active_marker, &config.active_marker);
        apply(&mut self.heading_fg, &config.heading_fg);
        self
    }

    pub fn nav_style(&self) -> Style {
        Style::default().fg(self.nav_fg).bg(self.nav_bg)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_valid_colors() {
        let config = ThemeConfig {
            selected_bg: Some(ColorValue::Named("red".to_string())),
            nav_fg: Some(ColorValue::Named("bogus".to_string())),
            ..ThemeConfig::default()
        };
        let theme = Theme::default().with_overrides(&config);
        assert_eq!(theme.selected_bg, Color::Red);
        assert_eq!(theme.nav_fg, Theme::default().nav_fg);
    }
}
