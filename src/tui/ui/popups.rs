use crate::tui::app::App;
use crate::tui::help_text;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

/// Centered popup sized as a percentage of `area`, never smaller than the
/// given minimums (clamped to `area`).
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16, min_w: u16, min_h: u16) -> Rect {
    let scale = |len: u16, percent: u16| {
        (u32::from(len) * u32::from(percent) / 100).min(u32::from(len)) as u16
    };
    let width = scale(area.width, percent_x).max(min_w).min(area.width);
    let height = scale(area.height, percent_y).max(min_h).min(area.height);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    // Min 40 cols for readability, min 10 rows for usable scroll area
    let popup_area = popup_area(area, 60, 80, 40, 10);
    let theme = &app.theme;

    frame.render_widget(Clear, popup_area);

    let help_lines = help_text::build_help_text(app.keybindings(), theme);
    let help_text_len = help_lines.len();

    let paragraph = Paragraph::new(help_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.selected_bg))
                .title(" Help ")
                .style(Style::default().bg(theme.nav_bg)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, popup_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.selected_bg));
    let mut scrollbar_state = ScrollbarState::new(help_text_len).position(app.help_scroll as usize);

    frame.render_stateful_widget(
        scrollbar,
        popup_area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered() {
        let area = popup_area(Rect::new(0, 0, 100, 50), 60, 80, 40, 10);
        assert_eq!(area, Rect::new(20, 5, 60, 40));
    }

    #[test]
    fn test_popup_respects_minimums_within_bounds() {
        let area = popup_area(Rect::new(0, 0, 30, 8), 60, 80, 40, 10);
        assert_eq!(area, Rect::new(0, 0, 30, 8));
    }

    #[test]
    fn test_popup_on_very_large_terminal() {
        let area = popup_area(Rect::new(0, 0, 1200, 300), 60, 80, 40, 10);
        assert_eq!(area, Rect::new(240, 30, 720, 240));
    }
}
