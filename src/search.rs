//! In-article search: matching, snippets, cyclic navigation and highlight splitting.
//!
//! Everything here is a pure function over caller-owned data. Matching is a
//! literal, case-insensitive substring scan over `title + ". " + content`.
//! Offsets are counted in characters so that a snippet window never lands
//! inside a multi-byte code point.

use crate::section::Section;
use serde::Serialize;

/// Characters of context kept on each side of a match in a snippet.
pub const SNIPPET_CONTEXT: usize = 40;

const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One matching section, derived fresh for every query.
pub struct SearchResult {
    /// Id of the matching section.
    pub section_id: String,
    /// Title of the matching section at search time.
    pub section_title: String,
    /// Text around the first match, with `...` where the window was clipped.
    pub snippet: String,
    /// Position of this entry in the result list.
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Step direction when cycling through results.
pub enum Direction {
    /// Towards the end of the list, wrapping to the first entry.
    Next,
    /// Towards the start of the list, wrapping to the last entry.
    Prev,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A run of text that either is or is not an occurrence of the highlight term.
pub struct Fragment {
    /// Original-case text of the run.
    pub text: String,
    /// Whether the run is an occurrence of the highlight term.
    pub is_match: bool,
}

impl Fragment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: false,
        }
    }

    fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: true,
        }
    }
}

/// Lower-cased text with a map back to the characters it came from.
///
/// A character whose lower-case form is several code points (such as `İ`)
/// contributes all of them, each pointing at the same original character.
struct Folded {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl Folded {
    fn new(original: &[char]) -> Self {
        let mut chars = Vec::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());
        for (i, c) in original.iter().enumerate() {
            for lower in c.to_lowercase() {
                chars.push(lower);
                origin.push(i);
            }
        }
        Self { chars, origin }
    }

    /// Original character range covered by the folded run `at..at + len`.
    fn span(&self, at: usize, len: usize) -> (usize, usize) {
        (self.origin[at], self.origin[at + len - 1] + 1)
    }
}

fn fold_chars(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn snippet_around(chars: &[char], at: usize, len: usize) -> String {
    let start = at.saturating_sub(SNIPPET_CONTEXT);
    let end = (at + len + SNIPPET_CONTEXT).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

#[must_use]
/// The text a section is matched against: its title, a full stop, then its body.
pub fn combined_text(section: &Section) -> String {
    format!("{}. {}", section.title, section.content)
}

#[must_use]
/// Finds every section whose combined text contains `query`, ignoring case.
///
/// A blank query matches nothing. Results follow section order, one per
/// section, each with a snippet around its first match.
pub fn search(sections: &[Section], query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = fold_chars(query);
    let mut results = Vec::new();

    for section in sections {
        let chars: Vec<char> = combined_text(section).chars().collect();
        let folded = Folded::new(&chars);

        let Some(at) = find_from(&folded.chars, &needle, 0) else {
            continue;
        };
        let (start, end) = folded.span(at, needle.len());

        results.push(SearchResult {
            section_id: section.id.clone(),
            section_title: section.title.clone(),
            snippet: snippet_around(&chars, start, end - start),
            index: results.len(),
        });
    }

    results
}

#[must_use]
/// Steps `current` one place through `results`, wrapping at both ends.
///
/// Callers only navigate non-empty result lists; an empty list yields 0.
pub fn navigate(results: &[SearchResult], current: usize, direction: Direction) -> usize {
    let len = results.len();
    if len == 0 {
        return 0;
    }
    match direction {
        Direction::Next => (current + 1) % len,
        Direction::Prev => {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        }
    }
}

#[must_use]
/// Splits `text` into plain and matching runs for `highlight`, ignoring case.
///
/// The term is scanned for literally, never compiled into a pattern. An empty
/// `text` or `highlight` comes back as a single plain fragment.
pub fn render_highlighted(text: &str, highlight: &str) -> Vec<Fragment> {
    if text.is_empty() || highlight.is_empty() {
        return vec![Fragment::plain(text)];
    }

    let chars: Vec<char> = text.chars().collect();
    let folded = Folded::new(&chars);
    let needle = fold_chars(highlight);

    let mut fragments = Vec::new();
    // `cursor` indexes `chars`, `from` indexes `folded.chars`.
    let mut cursor = 0;
    let mut from = 0;

    while let Some(at) = find_from(&folded.chars, &needle, from) {
        from = at + needle.len();
        let (start, end) = folded.span(at, needle.len());
        // A match that began inside an already-consumed character.
        let start = start.max(cursor);
        if start >= end {
            continue;
        }
        if start > cursor {
            fragments.push(Fragment::plain(chars[cursor..start].iter().collect::<String>()));
        }
        fragments.push(Fragment::matched(chars[start..end].iter().collect::<String>()));
        cursor = end;
    }

    if cursor < chars.len() {
        fragments.push(Fragment::plain(chars[cursor..].iter().collect::<String>()));
    }

    fragments
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
