//! Section and article representation.
//!
//! A section is one titled block of article text, keyed by an id that is
//! unique within its article. Articles keep their sections in document order,
//! which is also the order search results are reported in.

use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Titled block of article text with a stable identifier.
pub struct Section {
    /// Key unique within the owning article.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Body text between this heading and the next one.
    pub content: String,
    /// Heading depth (1 for top-level).
    pub level: usize,
}

impl Section {
    #[must_use]
    /// Builds a section from borrowed parts.
    pub fn new(id: &str, title: &str, content: &str, level: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            level,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// An ordered collection of sections read from one document.
pub struct Article {
    /// Display title (first level-1 heading or the document name).
    pub title: String,
    /// Where the article came from, for display and logging.
    pub source: String,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Article {
    #[must_use]
    /// Looks up the position of a section by its id.
    pub fn position_of(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    #[must_use]
    /// Looks up a section by its id.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }
}

#[must_use]
/// Turns a heading into a lower-case, hyphen-separated identifier.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Hands out section ids, suffixing repeats so every id stays unique.
#[derive(Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    /// Returns the slug of `title`, or the first free `slug-N` for N from 2.
    pub fn allocate(&mut self, title: &str) -> String {
        let base = slugify(title);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
