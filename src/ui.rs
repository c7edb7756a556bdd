//! The UI renders the application state into something visible and searchable.
//!
//! The draw function dispatches based on the current view. The reader shows
//! the section list beside the article text; when the search overlay is open
//! the list is replaced by the results and the help bar by the query line.

use crate::app_state::{AppState, View};
use crate::search::{render_highlighted, Fragment};
use crate::section::Article;
use crate::session::Visibility;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState, theme: &Theme) {
    let base = Style::default().fg(theme.foreground).bg(theme.background);
    f.render_widget(Block::default().style(base), f.area());

    match app.current_view {
        View::ArticleList => draw_article_list(f, app, theme),
        View::Reader => draw_reader(f, app, theme),
    }
}

fn bordered(title: String, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(title)
}

/// Turns highlight fragments into spans, styling the matching runs.
fn fragment_spans(fragments: Vec<Fragment>, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    let matched = Style::default()
        .fg(theme.match_fg)
        .bg(theme.match_bg)
        .add_modifier(Modifier::BOLD);

    fragments
        .into_iter()
        .map(|fragment| {
            if fragment.is_match {
                Span::styled(fragment.text, matched)
            } else {
                Span::styled(fragment.text, base)
            }
        })
        .collect()
}

fn highlighted_line(text: &str, query: &str, base: Style, theme: &Theme) -> Line<'static> {
    Line::from(fragment_spans(render_highlighted(text, query), base, theme))
}

fn draw_article_list(f: &mut Frame, app: &AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| {
            let count = article.sections.len();
            ListItem::new(Line::from(vec![
                Span::styled(
                    article.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({count} sections)"),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(format!("Articles ({})", app.articles.len()), theme))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.current_article_index));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let help = Paragraph::new("↑/↓: Navigate | Enter: Open | q: Quit")
        .style(Style::default().fg(theme.muted))
        .block(bordered(String::new(), theme));
    f.render_widget(help, chunks[1]);
}

fn draw_reader(f: &mut Frame, app: &AppState, theme: &Theme) {
    let Some(article) = app.current_article() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(chunks[0]);

    let bottom = match app.search.visibility() {
        Visibility::Open => {
            draw_results(f, app, theme, panes[0]);
            Paragraph::new(format!("/{}", app.search.query())).block(bordered(
                "Search (↑/↓: Matches | Enter: Jump | Esc: Close)".to_string(),
                theme,
            ))
        }
        Visibility::Closed => {
            draw_sections(f, app, article, theme, panes[0]);
            let text = app
                .message
                .clone()
                .unwrap_or_else(|| "↑/↓: Sections | /: Search | q: Back".to_string());
            Paragraph::new(text)
                .style(Style::default().fg(theme.muted))
                .block(bordered(String::new(), theme))
        }
    };
    draw_content(f, app, article, theme, panes[1]);
    f.render_widget(bottom, chunks[1]);
}

fn draw_sections(f: &mut Frame, app: &AppState, article: &Article, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = article
        .sections
        .iter()
        .map(|section| {
            let indent = "  ".repeat(section.level.saturating_sub(1));
            ListItem::new(format!("{indent}{}", section.title))
        })
        .collect();

    let list = List::new(items)
        .block(bordered("Sections".to_string(), theme))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.current_section_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_results(f: &mut Frame, app: &AppState, theme: &Theme, area: Rect) {
    let results = app.search.results();
    let query = app.search.query();

    let title = if query.trim().is_empty() {
        "Results".to_string()
    } else if results.is_empty() {
        "Results (no matches)".to_string()
    } else {
        format!(
            "Results ({}/{})",
            app.search.current_index() + 1,
            results.len()
        )
    };

    let snippet_style = Style::default().fg(theme.muted);
    let items: Vec<ListItem> = results
        .iter()
        .map(|result| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    result.section_title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                highlighted_line(&result.snippet, query, snippet_style, theme),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(bordered(title, theme))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let selected = (!results.is_empty()).then_some(app.search.current_index());
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_content(f: &mut Frame, app: &AppState, article: &Article, theme: &Theme, area: Rect) {
    let query = if app.search.query().trim().is_empty() {
        ""
    } else {
        app.search.query()
    };
    let highlighted = app.search.highlighted_section_id();

    let body = Style::default().fg(theme.foreground);
    let heading = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let emphasised = Style::default()
        .fg(theme.highlight_fg)
        .bg(theme.highlight_bg)
        .add_modifier(Modifier::BOLD);

    // Line layout must agree with app_state::section_height.
    let mut lines: Vec<Line> = Vec::new();
    for section in &article.sections {
        let title_style = if highlighted == Some(section.id.as_str()) {
            emphasised
        } else {
            heading
        };
        let marker = "#".repeat(section.level.max(1));
        let mut title = vec![Span::styled(format!("{marker} "), title_style)];
        title.extend(fragment_spans(
            render_highlighted(&section.title, query),
            title_style,
            theme,
        ));
        lines.push(Line::from(title));

        for text in section.content.lines() {
            lines.push(highlighted_line(text, query, body, theme));
        }
        lines.push(Line::default());
    }

    let scroll = u16::try_from(app.scroll).unwrap_or(u16::MAX);
    let content = Paragraph::new(lines)
        .block(bordered(article.title.clone(), theme))
        .scroll((scroll, 0));
    f.render_widget(content, area);
}
