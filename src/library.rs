//! The set of articles the reader works with.
//!
//! Articles come either from documents on disk or, when no paths are given,
//! from the awareness articles compiled into the binary.

use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::input;
use crate::search::{self, SearchResult};
use crate::section::Article;
use serde::Serialize;
use std::path::PathBuf;

/// Built-in articles as (source name, markdown text).
pub const BUILTIN_ARTICLES: &[(&str, &str)] = &[
    ("scam-calls", include_str!("../articles/scam-calls.md")),
    ("phishing", include_str!("../articles/phishing.md")),
    ("sentry-mode", include_str!("../articles/sentry-mode.md")),
];

/// Parses the built-in articles.
///
/// # Errors
///
/// Returns an error if the markdown grammar cannot be loaded.
pub fn builtin() -> Result<Vec<Article>> {
    let format = MarkdownFormat;
    let mut articles = Vec::new();
    for (name, text) in BUILTIN_ARTICLES {
        if let Some(article) = input::parse_article(text, name, name, &format)? {
            articles.push(article);
        }
    }
    Ok(articles)
}

/// Loads articles from `paths`, or the built-in set when `paths` is empty.
///
/// Documents without headings, or that fail to load, are skipped with a
/// warning.
///
/// # Errors
///
/// Returns an error if a path cannot be expanded, or if no article loads.
pub fn load(paths: Vec<PathBuf>, extensions: &[String]) -> Result<Vec<Article>> {
    if paths.is_empty() {
        tracing::info!("no paths given, using built-in articles");
        return builtin();
    }

    let format = MarkdownFormat;
    let mut articles = Vec::new();

    for doc in input::find_documents(paths, extensions)? {
        match input::load_article(&doc, &format) {
            Ok(Some(article)) => {
                tracing::debug!(
                    path = %doc.display(),
                    sections = article.sections.len(),
                    "loaded article"
                );
                articles.push(article);
            }
            Ok(None) => tracing::warn!(path = %doc.display(), "no sections, skipping"),
            Err(e) => tracing::warn!(path = %doc.display(), error = %e, "failed to load, skipping"),
        }
    }

    if articles.is_empty() {
        return Err(Error::NoArticles);
    }
    Ok(articles)
}

#[derive(Debug, Serialize)]
/// Matches for one article, as printed by `vigil search`.
pub struct ArticleMatches<'a> {
    /// Title of the article searched.
    pub article: &'a str,
    /// Where the article was loaded from.
    pub source: &'a str,
    /// Matching sections in article order.
    pub results: Vec<SearchResult>,
}

#[must_use]
/// Searches every article, keeping only those with at least one match.
pub fn search_all<'a>(articles: &'a [Article], query: &str) -> Vec<ArticleMatches<'a>> {
    articles
        .iter()
        .map(|article| ArticleMatches {
            article: &article.title,
            source: &article.source,
            results: search::search(&article.sections, query),
        })
        .filter(|matches| !matches.results.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/library.rs"]
mod tests;
