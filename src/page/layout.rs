//! Text layout for the page.
//!
//! Turns the page into rendered rows for a given column width and records
//! where each Region ends up, which is what the viewport watcher measures.

use super::{Page, PageItem, RegionKey};
use crate::viewport::Extent;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Prose,
    Heading,
    Body,
    Blank,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidOutLine {
    pub text: String,
    pub kind: LineKind,
    /// Region this row belongs to, if any.
    pub region: Option<RegionKey>,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub lines: Vec<LaidOutLine>,
    extents: Vec<(RegionKey, Extent)>,
}

impl PageLayout {
    /// Total rendered height in rows.
    pub fn height(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn extent(&self, key: RegionKey) -> Option<Extent> {
        self.extents
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, extent)| *extent)
    }

    /// Region extents in document order.
    pub fn extents(&self) -> &[(RegionKey, Extent)] {
        &self.extents
    }
}

/// Lay out every page item at `width` columns.
///
/// Items are separated by a single blank row. A Region spans its heading row
/// plus its wrapped body.
pub fn layout(page: &Page, width: u16) -> PageLayout {
    let cols = usize::from(width).max(1);
    let mut lines = Vec::new();
    let mut extents = Vec::new();

    for (i, item) in page.items().iter().enumerate() {
        if i > 0 {
            lines.push(LaidOutLine {
                text: String::new(),
                kind: LineKind::Blank,
                region: None,
            });
        }

        match item {
            PageItem::Prose(text) => {
                for source in text {
                    for row in wrap_text(source, cols) {
                        lines.push(LaidOutLine {
                            text: row,
                            kind: LineKind::Prose,
                            region: None,
                        });
                    }
                }
            }
            PageItem::Region(region) => {
                let top = lines.len() as u32;
                let key = region.key();
                for row in wrap_text(&region.label, cols) {
                    lines.push(LaidOutLine {
                        text: row,
                        kind: LineKind::Heading,
                        region: Some(key),
                    });
                }
                for source in &region.body {
                    for row in wrap_text(source, cols) {
                        lines.push(LaidOutLine {
                            text: row,
                            kind: LineKind::Body,
                            region: Some(key),
                        });
                    }
                }
                let height = lines.len() as u32 - top;
                extents.push((key, Extent { top, height }));
            }
        }
    }

    PageLayout {
        width,
        lines,
        extents,
    }
}

/// Greedy word wrap by display width. Words wider than a row are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.width() <= width {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width = word.width();
        let sep = usize::from(!current.is_empty());
        if current_width + sep + word_width <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}
