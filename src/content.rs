//! Portfolio content: markdown parsed into heading blocks with tree-sitter-md.
//!
//! Every ATX heading starts a block holding the text up to the next heading. A heading ending in
//! an identity attribute, `## Projects {#projects}`, names a navigable section; other headings are
//! plain content inside whichever section encloses them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Page shown when no content file is given.
pub const DEFAULT_PORTFOLIO: &str = include_str!("../assets/portfolio.md");

const HEADING_QUERY: &str = "(atx_heading) @heading";

#[derive(Debug, thiserror::Error)]
/// Reasons a portfolio document cannot be loaded.
pub enum ContentError {
    /// The content file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// The markdown grammar could not be loaded or queried.
    #[error("markdown grammar unavailable: {0}")]
    Grammar(String),
    /// The parser produced no tree.
    #[error("markdown parse failed")]
    Parse,
    /// Two headings claim the same identity.
    #[error("section id `{0}` is used more than once")]
    DuplicateSection(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading and the text beneath it.
pub struct Block {
    /// Heading depth, 0 for text before the first heading.
    pub level: usize,
    /// Heading text without markers or the identity attribute.
    pub title: String,
    /// Section identity, if the heading carries one.
    pub id: Option<String>,
    /// Raw markdown between this heading and the next.
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Parsed portfolio in document order.
pub struct Document {
    /// Heading blocks, preceded by a level-0 preamble when the text does not open on a heading.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Iterates over the identities of section headings in order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| b.id.as_deref())
    }
}

#[must_use]
/// Splits a trailing `{#id}` attribute off a heading.
pub fn split_identity(heading: &str) -> (String, Option<String>) {
    let trimmed = heading.trim();
    if let Some(body) = trimmed.strip_suffix('}') {
        if let Some(open) = body.rfind("{#") {
            let id = body[open + 2..].trim();
            let valid = !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if valid {
                return (body[..open].trim_end().to_string(), Some(id.to_string()));
            }
        }
    }
    (trimmed.to_string(), None)
}

fn heading_level(node: Node) -> usize {
    let mut cursor = node.walk();
    let level = node
        .children(&mut cursor)
        .find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse().ok())
        })
        .unwrap_or(1);
    level
}

fn heading_text<'a>(node: Node, source: &'a str) -> &'a str {
    let mut cursor = node.walk();
    let inline = node
        .children(&mut cursor)
        .find(|child| child.kind() == "inline");
    match inline {
        Some(inline) => &source[inline.byte_range()],
        None => source[node.byte_range()].trim().trim_start_matches('#'),
    }
}

/// Parses markdown into heading blocks.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, parsing fails, or two headings share an
/// identity.
pub fn parse_document(source: &str) -> Result<Document, ContentError> {
    let language: tree_sitter::Language = tree_sitter_md::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ContentError::Grammar(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or(ContentError::Parse)?;
    let query =
        Query::new(&language, HEADING_QUERY).map_err(|e| ContentError::Grammar(e.to_string()))?;

    // (start, end, level, title) for every heading, in document order
    let mut headings = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            headings.push((
                node.start_byte(),
                node.end_byte(),
                heading_level(node),
                heading_text(node, source).to_string(),
            ));
        }
    }
    headings.sort_by_key(|h| h.0);

    let mut blocks = Vec::new();
    let first_start = headings.first().map_or(source.len(), |h| h.0);
    let preamble = source[..first_start].trim();
    if !preamble.is_empty() {
        blocks.push(Block {
            level: 0,
            title: String::new(),
            id: None,
            body: preamble.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, (_, end, level, text)) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map_or(source.len(), |next| next.0);
        let (title, id) = split_identity(text);
        if let Some(ref id) = id {
            if !seen.insert(id.clone()) {
                return Err(ContentError::DuplicateSection(id.clone()));
            }
        }
        blocks.push(Block {
            level: *level,
            title,
            id,
            body: source[(*end).min(body_end)..body_end].trim().to_string(),
        });
    }

    Ok(Document { blocks })
}

/// Reads and parses a portfolio file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Document, ContentError> {
    let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&source)
}

#[cfg(test)]
#[path = "tests/content.rs"]
mod tests;
