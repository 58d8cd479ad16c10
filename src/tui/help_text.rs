use crate::keybindings::{KeybindingMode, Keybindings};
use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 14;

/// Build the help text from the live keybindings, grouped by category
pub fn build_help_text(keybindings: &Keybindings, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "sectionnav",
            Style::default()
                .fg(theme.title_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Jump between sections; the bar follows what you read",
            Style::default()
                .fg(theme.prose_fg)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let mut category = "";
    for (action, keys) in keybindings.help_entries(KeybindingMode::Normal) {
        if action.category() != category {
            category = action.category();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                category.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let formatted_keys = format!("  {:<width$}", keys.join(", "), width = KEY_COLUMN_WIDTH);
        lines.push(Line::from(vec![
            Span::styled(formatted_keys, Style::default().fg(theme.heading_fg)),
            Span::raw(action.description()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Mouse: wheel scrolls, click a bar entry to jump",
        Style::default().fg(theme.prose_fg),
    )));
    lines.push(Line::from(Span::styled(
        "Use j/k or ↓/↑ to scroll | Press Esc or ? to close",
        Style::default()
            .fg(theme.prose_fg)
            .add_modifier(Modifier::ITALIC),
    )));
    lines
}
