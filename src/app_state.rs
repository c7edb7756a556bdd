//! The core state machine bridging articles, the reader and the search overlay.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated
//! as the user navigates. The reader lays every section of the open article
//! out one after another, and we register the line each section starts on so
//! that search navigation can scroll to a section by id alone.

use crate::search::Direction;
use crate::section::{Article, Section};
use crate::session::SearchSession;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Poll interval when no highlight is waiting to lapse.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(PartialEq, Eq, Debug)]
/// Determines navigation scope and quit behavior based on library size.
pub enum LibraryMode {
    /// Single-article mode quits directly to shell.
    Single,
    /// Multi-article mode returns to the article list before quitting.
    Multi,
}

#[derive(PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Lists the available articles.
    ArticleList,
    /// Shows one article: section list beside the scrolled content.
    Reader,
}

/// Bridges the article library and the interactive reader, holding session state.
pub struct AppState {
    /// All loaded articles.
    pub articles: Vec<Article>,
    /// Controls quit behavior and article list visibility.
    pub library_mode: LibraryMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Selected article in the article list, and the one open in the reader.
    pub current_article_index: usize,
    /// Section the reader is positioned on.
    pub current_section_index: usize,
    /// First content line shown in the reader.
    pub scroll: usize,
    /// In-article search overlay state.
    pub search: SearchSession,
    /// Line each section of the open article starts on, keyed by section id.
    pub section_offsets: HashMap<String, usize>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

#[must_use]
/// Lines a section occupies in the reader: title, body, blank separator.
pub fn section_height(section: &Section) -> usize {
    2 + section.content.lines().count()
}

impl AppState {
    #[must_use]
    /// Initialises application state and determines library mode.
    ///
    /// A single article opens straight into the reader; several show the
    /// article list first.
    pub fn new(articles: Vec<Article>, highlight_duration: Duration) -> Self {
        let library_mode = if articles.len() == 1 {
            LibraryMode::Single
        } else {
            LibraryMode::Multi
        };

        let mut state = Self {
            articles,
            library_mode,
            current_view: View::ArticleList,
            current_article_index: 0,
            current_section_index: 0,
            scroll: 0,
            search: SearchSession::new(highlight_duration),
            section_offsets: HashMap::new(),
            message: None,
        };

        if state.library_mode == LibraryMode::Single {
            state.open_article(0);
        }
        state
    }

    #[must_use]
    /// The article open in the reader (or selected in the list).
    pub fn current_article(&self) -> Option<&Article> {
        self.articles.get(self.current_article_index)
    }

    fn current_sections(&self) -> &[Section] {
        self.current_article()
            .map(|a| a.sections.as_slice())
            .unwrap_or_default()
    }

    /// Opens an article in the reader, starting at its first section.
    pub fn open_article(&mut self, index: usize) {
        if index >= self.articles.len() {
            return;
        }
        self.current_article_index = index;
        self.current_section_index = 0;
        self.scroll = 0;
        self.search.close();
        self.register_offsets();
        self.current_view = View::Reader;
        tracing::debug!(article = %self.articles[index].title, "opened article");
    }

    /// Leaves the reader. Returns true when the application should quit.
    pub fn back(&mut self) -> bool {
        match (&self.current_view, &self.library_mode) {
            (View::Reader, LibraryMode::Multi) => {
                self.search.close();
                self.section_offsets.clear();
                self.current_view = View::ArticleList;
                false
            }
            _ => true,
        }
    }

    fn register_offsets(&mut self) {
        self.section_offsets.clear();
        let mut line = 0;
        if let Some(article) = self.articles.get(self.current_article_index) {
            for section in &article.sections {
                self.section_offsets.insert(section.id.clone(), line);
                line += section_height(section);
            }
        }
    }

    #[must_use]
    /// Returns the following article index for sequential navigation.
    pub fn find_next_article(&self) -> Option<usize> {
        (self.current_article_index + 1 < self.articles.len())
            .then_some(self.current_article_index + 1)
    }

    #[must_use]
    /// Returns the preceding article index for reverse navigation.
    pub fn find_prev_article(&self) -> Option<usize> {
        self.current_article_index.checked_sub(1)
    }

    #[must_use]
    /// Returns the following section index for sequential navigation.
    pub fn find_next_section(&self) -> Option<usize> {
        (self.current_section_index + 1 < self.current_sections().len())
            .then_some(self.current_section_index + 1)
    }

    #[must_use]
    /// Returns the preceding section index for reverse navigation.
    pub fn find_prev_section(&self) -> Option<usize> {
        self.current_section_index.checked_sub(1)
    }

    /// Positions the reader on the section at `index`.
    pub fn go_to_section(&mut self, index: usize) {
        let Some(id) = self.current_sections().get(index).map(|s| s.id.clone()) else {
            return;
        };
        self.scroll_to_section(&id);
    }

    /// Scrolls the reader so that the section `section_id` is at the top.
    ///
    /// An id with no registered offset is logged and otherwise ignored.
    pub fn scroll_to_section(&mut self, section_id: &str) -> bool {
        let Some(&offset) = self.section_offsets.get(section_id) else {
            tracing::warn!(section = section_id, "no registered offset for section");
            return false;
        };
        if let Some(index) = self.current_article().and_then(|a| a.position_of(section_id)) {
            self.current_section_index = index;
        }
        self.scroll = offset;
        true
    }

    // --- Search ---

    /// Opens or closes the search overlay.
    pub fn toggle_search(&mut self) {
        self.search.toggle();
        self.message = None;
    }

    /// Appends a typed character to the query.
    pub fn search_input(&mut self, c: char) {
        let sections = self
            .articles
            .get(self.current_article_index)
            .map(|a| a.sections.as_slice())
            .unwrap_or_default();
        self.search.push_char(sections, c);
    }

    /// Handles `/` while the overlay is open.
    ///
    /// On an empty query it closes the overlay again; otherwise it is typed.
    pub fn search_slash(&mut self) {
        if self.search.query().is_empty() {
            self.toggle_search();
        } else {
            self.search_input('/');
        }
    }

    /// Deletes the last character of the query.
    pub fn search_backspace(&mut self) {
        let sections = self
            .articles
            .get(self.current_article_index)
            .map(|a| a.sections.as_slice())
            .unwrap_or_default();
        self.search.pop_char(sections);
    }

    /// Steps to the next or previous match and scrolls to its section.
    pub fn search_navigate(&mut self, direction: Direction, now: Instant) {
        let target = self
            .search
            .navigate(direction, now)
            .map(|r| r.section_id.clone());
        match target {
            Some(id) => {
                self.scroll_to_section(&id);
                self.message = Some(format!(
                    "Match {} of {}",
                    self.search.current_index() + 1,
                    self.search.results().len()
                ));
            }
            None => self.message = Some("No matches".to_string()),
        }
    }

    /// Jumps to the match under the cursor and closes the overlay.
    pub fn search_select(&mut self) {
        if let Some(result) = self.search.select_current() {
            self.scroll_to_section(&result.section_id);
        }
        self.message = None;
    }

    /// Fires the highlight's clear once it is due. Returns whether a redraw is needed.
    ///
    /// The clear is tied to the navigation that armed it, so a deadline from an
    /// earlier navigation never removes a later highlight.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.pending_clear() {
            Some(pending) if pending.due <= now => self.search.clear_highlight(pending),
            _ => false,
        }
    }

    #[must_use]
    /// How long the event loop may wait for input before the next tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.search
            .time_to_expiry(now)
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL))
    }

    // --- </Search> ---
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
