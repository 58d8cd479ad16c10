//! Navigation bar overlay.
//!
//! The bar is drawn on top of the page area, so showing or hiding it never
//! moves the page text underneath.

use crate::nav::{EntryKind, NavContainer};
use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Horizontal padding inside an entry cell
const CELL_PAD: u16 = 1;

fn cell_width(label: &str) -> u16 {
    (label.width() as u16).saturating_add(CELL_PAD * 2)
}

/// Work out where every visible entry goes inside `area`.
///
/// When all link entries fit on one row they are laid out left to right and
/// the expand control is not shown. Otherwise only the expand control is
/// shown at the right edge, and in responsive mode the links stack below it.
pub fn entry_areas(nav: &NavContainer, area: Rect) -> Vec<(Rect, usize)> {
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let mut links = Vec::new();
    let mut expand = None;
    for (idx, entry) in nav.entries().iter().enumerate() {
        match entry.kind {
            EntryKind::Link { .. } => links.push((idx, cell_width(&entry.label))),
            EntryKind::Expand => expand = Some((idx, cell_width(&entry.label))),
        }
    }

    let row_width: u16 = links
        .iter()
        .map(|(_, w)| *w)
        .fold(0u16, |acc, w| acc.saturating_add(w));

    let mut areas = Vec::new();
    if row_width <= area.width {
        let mut x = area.x;
        for (idx, w) in links {
            areas.push((Rect::new(x, area.y, w, 1), idx));
            x += w;
        }
        return areas;
    }

    let Some((expand_idx, expand_width)) = expand else {
        return areas;
    };
    let expand_width = expand_width.min(area.width);
    areas.push((
        Rect::new(area.right() - expand_width, area.y, expand_width, 1),
        expand_idx,
    ));

    if nav.is_responsive() {
        let column = links
            .iter()
            .map(|(_, w)| *w)
            .max()
            .unwrap_or(0)
            .min(area.width);
        let x = area.right() - column;
        for (row, (idx, _)) in links.into_iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.bottom() {
                break;
            }
            areas.push((Rect::new(x, y, column, 1), idx));
        }
    }
    areas
}

/// Draw the bar and remember where each entry landed for mouse hit tests.
pub fn render_nav_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let nav = app.controller.nav();
    if !nav.is_visible() || nav.is_empty() {
        app.nav_hits.clear();
        return;
    }

    let theme = &app.theme;
    let hits = entry_areas(nav, area);

    // Background strip across the top row
    let strip = Rect::new(area.x, area.y, area.width, area.height.min(1));
    frame.render_widget(Clear, strip);
    frame.render_widget(Block::default().style(theme.nav_style()), strip);

    for &(cell, idx) in &hits {
        let Some(entry) = nav.entry(idx) else {
            continue;
        };
        let mut style = if entry.is_selected() {
            theme.selected_style()
        } else {
            theme.nav_style()
        };
        if app.focused_entry == Some(idx) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let pad = " ".repeat(usize::from(CELL_PAD));
        let text = format!("{}{}{}", pad, entry.label, pad);

        frame.render_widget(Clear, cell);
        frame.render_widget(Paragraph::new(text).style(style), cell);
    }

    app.nav_hits = hits;
}
