//! Section representation for the laid out portfolio document.
//!
//! A section is a named region of the page corresponding to one navigation destination. Its
//! region is the span of rows it occupies once the document has been wrapped to the current
//! terminal width, so regions are rebuilt on every re-layout while ids stay stable.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Span of document rows occupied by a section.
pub struct Region {
    /// First row of the section heading.
    pub top: usize,
    /// Number of rows up to (not including) the next section boundary.
    pub height: usize,
}

impl Region {
    #[must_use]
    /// Row just past the end of the region.
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    #[must_use]
    /// Whether `row` falls inside the region.
    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Named page region with its current position in the layout.
pub struct Section {
    /// Unique, stable identifier taken from the heading's `{#id}` attribute.
    pub id: String,
    /// Heading text without markup or the identity attribute.
    pub title: String,
    /// Heading depth (1 for `#`).
    pub level: usize,
    /// Rows occupied in the current layout.
    pub region: Region,
}

#[derive(Clone, Debug, Default, Serialize)]
/// Ordered set of the sections present in the rendered document.
///
/// Discovery is a pure query over the layout: every heading carrying an identity becomes an
/// entry, in document order.
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    #[must_use]
    /// Wraps sections that are already in document order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    #[must_use]
    /// Looks up a section by id.
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    #[must_use]
    /// Position of a section in document order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Iterates over section ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Iterates over sections in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    /// The section whose region covers `row`, if any.
    pub fn section_at_row(&self, row: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.region.contains(row))
    }

    #[must_use]
    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Whether the document has no identified sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
