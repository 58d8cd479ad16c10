mod nav_bar;
mod popups;

use crate::idle::BarState;
use crate::page::LineKind;
use crate::tui::app::App;
use nav_bar::render_nav_bar;
use popups::render_help_popup;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use std::time::Instant;

/// Columns reserved left of the page text for the active marker
const GUTTER_WIDTH: u16 = 2;
/// Columns reserved right of the page text for the scrollbar
const SCROLLBAR_WIDTH: u16 = 1;

pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();
    let [title_area, page_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let text_width = page_area
        .width
        .saturating_sub(GUTTER_WIDTH + SCROLLBAR_WIDTH)
        .max(1);
    app.resize_page(text_width, page_area.height, now);

    render_title_bar(frame, app, title_area);
    render_page(frame, app, page_area);
    render_nav_bar(frame, app, page_area);
    render_status_bar(frame, app, status_area);

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let region_count = app.controller.page().region_count();
    let title_text = format!("sectionnav - {} - {} sections", app.filename, region_count);

    let title = Paragraph::new(title_text).style(
        Style::default()
            .fg(app.theme.title_fg)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let controller = &app.controller;
    let viewport = controller.viewport();
    let page = controller.page();

    let first = viewport.scroll_top() as usize;
    let rows = usize::from(area.height);
    let lines: Vec<Line> = controller
        .layout()
        .lines
        .iter()
        .skip(first)
        .take(rows)
        .map(|line| {
            let active = line
                .region
                .and_then(|key| page.region(key))
                .is_some_and(|region| region.is_active());
            let gutter = if active {
                Span::styled("▎ ", Style::default().fg(theme.active_marker))
            } else {
                Span::raw("  ")
            };
            let style = match line.kind {
                LineKind::Heading => theme.heading_style(),
                LineKind::Prose => Style::default()
                    .fg(theme.title_fg)
                    .add_modifier(Modifier::BOLD),
                LineKind::Body | LineKind::Blank => Style::default().fg(theme.prose_fg),
            };
            Line::from(vec![gutter, Span::styled(line.text.clone(), style)])
        })
        .collect();

    let text_area = Rect {
        width: area.width.saturating_sub(SCROLLBAR_WIDTH),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), text_area);

    if viewport.max_scroll() > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .style(Style::default().fg(theme.nav_fg));
        let mut state = ScrollbarState::new(viewport.max_scroll() as usize)
            .position(viewport.scroll_top() as usize);
        frame.render_stateful_widget(scrollbar, area, &mut state);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some((msg, _)) = &app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let viewport = app.controller.viewport();
    let percent = if viewport.max_scroll() == 0 {
        100
    } else {
        viewport.scroll_top() * 100 / viewport.max_scroll()
    };
    let section = app.active_label().unwrap_or("-");
    let bar = match app.controller.bar_state() {
        BarState::Visible => "bar shown",
        BarState::Hidden => "bar hidden",
    };

    let status_text = format!(
        " {} • {}% • {} • Tab:Entry • Enter:Go • ?:Help • q:Quit",
        section, percent, bar
    );
    frame.render_widget(Paragraph::new(status_text).style(theme.status_style()), area);
}
