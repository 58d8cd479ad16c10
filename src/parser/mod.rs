//! Markdown to page conversion.
//!
//! Headings at the section level become Regions; shallower headings become
//! prose blocks (a document title, say); deeper headings stay inside the
//! body of the Region they belong to.
//!
//! Heading extraction is delegated to `turbovault-parser` so headings inside
//! code blocks are not mistaken for sections.

pub mod utils;

use crate::page::{ItemSpec, Page, RegionSpec};
use std::collections::HashSet;
use std::path::Path;
use utils::{is_setext_underline, split_heading_attribute, strip_markdown_inline, trim_blank_lines};

/// Parse a markdown file into a page.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path, section_level: usize) -> std::io::Result<Page> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_markdown(&content, section_level))
}

struct SplitPoint {
    level: usize,
    text: String,
    offset: usize,
}

/// Parse markdown content into a page whose Regions are the headings at
/// `section_level`.
pub fn parse_markdown(content: &str, section_level: usize) -> Page {
    let splits: Vec<SplitPoint> = turbovault_parser::parse_headings(content)
        .into_iter()
        .map(|h| SplitPoint {
            level: h.level as usize,
            text: h.text,
            offset: h.position.offset,
        })
        .filter(|h| h.level <= section_level)
        .filter(|h| h.offset <= content.len() && content.is_char_boundary(h.offset))
        .collect();

    let mut items = Vec::new();
    let mut anchors = AnchorRegistry::default();

    let preamble_end = splits.first().map_or(content.len(), |s| s.offset);
    let preamble = clean_lines(content[..preamble_end].lines());
    if !preamble.is_empty() {
        items.push(ItemSpec::Prose(preamble));
    }

    for (i, split) in splits.iter().enumerate() {
        let end = splits
            .get(i + 1)
            .map_or(content.len(), |next| next.offset)
            .max(split.offset);
        let mut lines = content[split.offset..end].lines();
        let raw_heading = lines.next().unwrap_or_default();

        let mut body_lines: Vec<&str> = lines.collect();
        if body_lines.first().is_some_and(|l| is_setext_underline(l)) {
            body_lines.remove(0);
        }
        let body = clean_lines(body_lines.into_iter());

        let (_, explicit_anchor) = split_heading_attribute(raw_heading);
        let (label, _) = split_heading_attribute(&split.text);
        let label = strip_markdown_inline(label).trim().to_string();

        if split.level == section_level {
            let anchor = match explicit_anchor {
                Some(anchor) => Some(anchors.claim(anchor)),
                None if label.is_empty() => None,
                None => Some(anchors.claim(&turbovault_parser::slugify(&label))),
            };
            items.push(ItemSpec::Region(RegionSpec {
                anchor,
                label: Some(label),
                body,
            }));
        } else {
            let mut prose = vec![label];
            if !body.is_empty() {
                prose.push(String::new());
                prose.extend(body);
            }
            items.push(ItemSpec::Prose(prose));
        }
    }

    Page::from_items(items)
}

fn clean_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let lines: Vec<String> = lines
        .map(|l| strip_markdown_inline(l.trim_end()))
        .collect();
    trim_blank_lines(&lines).to_vec()
}

/// Hands out unique anchors, suffixing repeats with `-1`, `-2`, ...
#[derive(Default)]
struct AnchorRegistry {
    taken: HashSet<String>,
}

impl AnchorRegistry {
    fn claim(&mut self, base: &str) -> String {
        let mut anchor = base.to_string();
        let mut n = 0;
        while self.taken.contains(&anchor) {
            n += 1;
            anchor = format!("{}-{}", base, n);
        }
        self.taken.insert(anchor.clone());
        anchor
    }
}
