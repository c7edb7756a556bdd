//! The state of one open search interaction.
//!
//! The session owns the query, its results, the cursor into them, and the
//! transient highlight of the section navigated to last. The reader holds the
//! only mutable reference; nothing is shared or persisted.
//!
//! # Highlight expiry
//!
//! Every navigation bumps a generation counter and arms a fresh deadline. A
//! clear request carries the generation it was issued for, and is ignored if
//! a newer navigation has happened since. A slow timer from an earlier
//! navigation therefore cannot wipe out the current highlight.

use crate::search::{self, Direction, SearchResult};
use crate::section::Section;
use std::time::{Duration, Instant};

/// How long a navigated-to section stays emphasised unless configured otherwise.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether the search overlay is showing.
pub enum Visibility {
    /// Overlay hidden; the session holds no query.
    Closed,
    /// Overlay showing; keystrokes edit the query.
    Open,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Highlight {
    section_id: String,
    generation: u64,
    expires_at: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle for clearing the highlight set by one particular navigation.
pub struct PendingClear {
    /// Navigation this clear belongs to.
    pub generation: u64,
    /// When the clear should fire.
    pub due: Instant,
}

#[derive(Debug)]
/// Query, results, cursor and highlight for the search overlay.
pub struct SearchSession {
    visibility: Visibility,
    query: String,
    results: Vec<SearchResult>,
    current_index: usize,
    highlight: Option<Highlight>,
    generation: u64,
    highlight_duration: Duration,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT)
    }
}

impl SearchSession {
    #[must_use]
    /// Creates a closed, empty session.
    pub fn new(highlight_duration: Duration) -> Self {
        Self {
            visibility: Visibility::Closed,
            query: String::new(),
            results: Vec::new(),
            current_index: 0,
            highlight: None,
            generation: 0,
            highlight_duration,
        }
    }

    #[must_use]
    /// Current overlay state.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    /// Whether the overlay is showing.
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    #[must_use]
    /// The raw query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    /// Results for the current query, in section order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    /// Cursor into the results; only meaningful when there are results.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    /// The result under the cursor, if any.
    pub fn current_result(&self) -> Option<&SearchResult> {
        self.results.get(self.current_index)
    }

    #[must_use]
    /// The section currently emphasised, if any.
    pub fn highlighted_section_id(&self) -> Option<&str> {
        self.highlight.as_ref().map(|h| h.section_id.as_str())
    }

    /// Shows the overlay. Opening an open session changes nothing.
    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
    }

    /// Hides the overlay, dropping the query, results, cursor and highlight.
    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
        self.query.clear();
        self.results.clear();
        self.current_index = 0;
        self.highlight = None;
    }

    /// Flips between open and closed.
    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Closed => self.open(),
            Visibility::Open => self.close(),
        }
    }

    /// Replaces the query and recomputes results against `sections`.
    ///
    /// The cursor always returns to the first result.
    pub fn set_query(&mut self, sections: &[Section], query: &str) {
        query.clone_into(&mut self.query);
        self.results = search::search(sections, &self.query);
        self.current_index = 0;
        tracing::debug!(query = %self.query, matches = self.results.len(), "search");
    }

    /// Appends one typed character to the query.
    pub fn push_char(&mut self, sections: &[Section], c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(sections, &query);
    }

    /// Removes the last character of the query.
    pub fn pop_char(&mut self, sections: &[Section]) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(sections, &query);
    }

    /// Moves the cursor one result in `direction` and emphasises that section.
    ///
    /// Returns the result navigated to, or `None` when there are no results.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Option<&SearchResult> {
        if self.results.is_empty() {
            return None;
        }

        self.current_index = search::navigate(&self.results, self.current_index, direction);
        self.generation += 1;

        let result = &self.results[self.current_index];
        self.highlight = Some(Highlight {
            section_id: result.section_id.clone(),
            generation: self.generation,
            expires_at: now + self.highlight_duration,
        });
        tracing::debug!(
            section = %result.section_id,
            index = self.current_index,
            generation = self.generation,
            "navigated to result"
        );

        Some(result)
    }

    #[must_use]
    /// The clear request for the live highlight, if one is set.
    pub fn pending_clear(&self) -> Option<PendingClear> {
        self.highlight.as_ref().map(|h| PendingClear {
            generation: h.generation,
            due: h.expires_at,
        })
    }

    /// Clears the highlight if it still belongs to `pending`'s navigation.
    ///
    /// Returns whether anything was cleared.
    pub fn clear_highlight(&mut self, pending: PendingClear) -> bool {
        match &self.highlight {
            Some(h) if h.generation == pending.generation => {
                self.highlight = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    /// Time left before the live highlight lapses.
    pub fn time_to_expiry(&self, now: Instant) -> Option<Duration> {
        self.highlight
            .as_ref()
            .map(|h| h.expires_at.saturating_duration_since(now))
    }

    /// Takes the result under the cursor and closes the overlay.
    pub fn select_current(&mut self) -> Option<SearchResult> {
        let selected = self.current_result().cloned();
        self.close();
        selected
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
