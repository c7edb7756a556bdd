//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over document
//! formats by providing the tree-sitter grammar and heading queries needed to
//! cut a document into article sections.

pub mod markdown;

/// Grammar and queries that locate headings in one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node as `@heading`.
    fn section_query(&self) -> &str;
    /// Node kind holding a heading's text.
    fn title_kind(&self) -> &str;
    /// Heading depth from the kind of the heading's marker child.
    fn heading_level(&self, marker_kind: &str) -> Option<usize>;
}
