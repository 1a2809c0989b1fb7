//! Wraps a parsed document into terminal rows and records where each section lands.
//!
//! A section's region starts at its heading row and ends at the next identified heading, or at
//! the next heading of the same or a shallower level, whichever comes first. Trailing content
//! such as a footer therefore belongs to no section.

use crate::content::{Block, Document};
use crate::section::{Region, Section, SectionRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a row should be styled.
pub enum LineKind {
    /// Heading row at the given depth.
    Heading(usize),
    /// Wrapped paragraph or list text.
    Body,
    /// Empty spacer row.
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One rendered row of the document.
pub struct LaidLine {
    /// Styling class.
    pub kind: LineKind,
    /// Text content, already wrapped to fit.
    pub text: String,
}

#[derive(Clone, Debug, Default)]
/// Rows of the document at one width, and the section regions within them.
pub struct DocumentLayout {
    /// Rendered rows in order.
    pub lines: Vec<LaidLine>,
    /// Sections discovered in this layout.
    pub registry: SectionRegistry,
    /// Width the text was wrapped to.
    pub width: usize,
}

impl DocumentLayout {
    #[must_use]
    /// Total number of rows.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    /// Largest scroll row that still fills a viewport of `viewport_height` rows.
    pub fn max_scroll(&self, viewport_height: usize) -> usize {
        self.height().saturating_sub(viewport_height)
    }
}

#[must_use]
/// Greedy word wrap to `width` columns, hard-splitting words longer than a line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[must_use]
/// Drops inline markup: code backticks, `**`/`__` emphasis and link targets (`[text](url)`
/// keeps `text`).
pub fn plain_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '`' => {}
            '*' | '_' if chars.peek().is_some_and(|&(_, next)| next == c) => {
                chars.next();
            }
            '[' if text[i..]
                .find(']')
                .is_some_and(|end| text[i + end + 1..].starts_with('(')) => {}
            ']' if chars.peek().is_some_and(|&(_, next)| next == '(') => {
                for (_, skipped) in chars.by_ref() {
                    if skipped == ')' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn list_marker(line: &str) -> Option<(&str, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(("• ", rest));
        }
    }
    None
}

fn push_body(lines: &mut Vec<LaidLine>, body: &str, width: usize) {
    let mut paragraph = String::new();
    let flush = |paragraph: &mut String, lines: &mut Vec<LaidLine>| {
        if paragraph.is_empty() {
            return;
        }
        for text in wrap(paragraph, width) {
            lines.push(LaidLine {
                kind: LineKind::Body,
                text,
            });
        }
        paragraph.clear();
    };

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            flush(&mut paragraph, lines);
            if lines.last().is_some_and(|l| l.kind != LineKind::Blank) {
                lines.push(LaidLine {
                    kind: LineKind::Blank,
                    text: String::new(),
                });
            }
        } else if let Some((bullet, rest)) = list_marker(line) {
            flush(&mut paragraph, lines);
            let indent = " ".repeat(bullet.chars().count());
            let rest = plain_text(rest);
            for (i, text) in wrap(&rest, width.saturating_sub(2))
                .into_iter()
                .enumerate()
            {
                let prefix = if i == 0 { bullet } else { indent.as_str() };
                lines.push(LaidLine {
                    kind: LineKind::Body,
                    text: format!("{prefix}{text}"),
                });
            }
        } else {
            if !paragraph.is_empty() {
                paragraph.push(' ');
            }
            paragraph.push_str(&plain_text(line));
        }
    }
    flush(&mut paragraph, lines);
}

fn push_heading(lines: &mut Vec<LaidLine>, block: &Block, width: usize) {
    for text in wrap(&plain_text(&block.title), width) {
        lines.push(LaidLine {
            kind: LineKind::Heading(block.level),
            text,
        });
    }
}

fn blank() -> LaidLine {
    LaidLine {
        kind: LineKind::Blank,
        text: String::new(),
    }
}

#[must_use]
/// Lays `document` out at `width` columns.
pub fn layout_document(document: &Document, width: usize) -> DocumentLayout {
    let mut lines: Vec<LaidLine> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    // Index into `sections` of the region still being extended
    let mut open: Option<usize> = None;

    for block in &document.blocks {
        let ends_open = open.is_some_and(|i| block.id.is_some() || block.level <= sections[i].level);
        if ends_open && block.level > 0 {
            if let Some(i) = open.take() {
                sections[i].region.height = lines.len() - sections[i].region.top;
            }
        }

        if block.level > 0 {
            if let Some(id) = &block.id {
                sections.push(Section {
                    id: id.clone(),
                    title: block.title.clone(),
                    level: block.level,
                    region: Region {
                        top: lines.len(),
                        height: 0,
                    },
                });
                open = Some(sections.len() - 1);
            }
            push_heading(&mut lines, block, width);
            lines.push(blank());
        }

        push_body(&mut lines, &block.body, width);
        if lines.last().is_some_and(|l| l.kind != LineKind::Blank) {
            lines.push(blank());
        }
    }

    if let Some(i) = open {
        sections[i].region.height = lines.len() - sections[i].region.top;
    }

    DocumentLayout {
        lines,
        registry: SectionRegistry::new(sections),
        width,
    }
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
