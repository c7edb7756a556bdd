//! Reading documents from disk and cutting them into article sections.
//!
//! Headings are located with a tree-sitter query; a section's body runs from
//! the end of its heading to the start of the next one, whatever the depth.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{Article, IdAllocator, Section};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

struct Heading {
    title: String,
    level: usize,
    start_byte: usize,
    end_byte: usize,
}

/// Expands files and directories into the documents to load.
///
/// Files named directly are always kept. Directories are walked recursively
/// and contribute files whose extension is in `extensions`, sorted by path.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(&path, extensions, &mut found)?;
            found.sort();
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }

    Ok(documents)
}

fn walk_dir(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, extensions, found)?;
        } else if has_extension(&path, extensions) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn parse_error(source: &str, message: &dyn std::fmt::Display) -> Error {
    Error::Parse {
        path: PathBuf::from(source),
        message: message.to_string(),
    }
}

fn find_headings(text: &str, source: &str, format: &impl Format) -> Result<Vec<Heading>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| parse_error(source, &e))?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| parse_error(source, &"parser produced no tree"))?;

    let query =
        Query::new(&language, format.section_query()).map_err(|e| parse_error(source, &e))?;
    let bytes = text.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let mut level = None;
            let mut title = String::new();

            let mut walker = node.walk();
            for child in node.children(&mut walker) {
                if let Some(l) = format.heading_level(child.kind()) {
                    level = Some(l);
                } else if child.kind() == format.title_kind() {
                    title = child
                        .utf8_text(bytes)
                        .map_err(|e| parse_error(source, &e))?
                        .trim()
                        .to_string();
                }
            }

            headings.push(Heading {
                title,
                level: level.unwrap_or(1),
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
            });
        }
    }

    headings.sort_by_key(|h| h.start_byte);
    Ok(headings)
}

/// Cuts `text` into an article, one section per heading.
///
/// The title is the first level-1 heading, else `fallback_title`. Returns
/// `None` when the text has no headings at all.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or the text cannot be parsed.
pub fn parse_article(
    text: &str,
    source: &str,
    fallback_title: &str,
    format: &impl Format,
) -> Result<Option<Article>> {
    let headings = find_headings(text, source, format)?;
    if headings.is_empty() {
        return Ok(None);
    }

    let mut ids = IdAllocator::default();
    let mut sections = Vec::with_capacity(headings.len());

    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings
            .get(i + 1)
            .map_or(text.len(), |next| next.start_byte);
        let body = text
            .get(heading.end_byte.min(body_end)..body_end)
            .unwrap_or_default()
            .trim();

        sections.push(Section {
            id: ids.allocate(&heading.title),
            title: heading.title.clone(),
            content: body.to_string(),
            level: heading.level,
        });
    }

    let title = headings
        .iter()
        .find(|h| h.level == 1)
        .map_or_else(|| fallback_title.to_string(), |h| h.title.clone());

    Ok(Some(Article {
        title,
        source: source.to_string(),
        sections,
    }))
}

/// Reads and parses one document into an article.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_article(path: &Path, format: &impl Format) -> Result<Option<Article>> {
    let text = fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
    parse_article(&text, &path.display().to_string(), &fallback, format)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
