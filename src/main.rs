//! vigil: a searchable terminal reader for awareness articles.
#![allow(clippy::multiple_crate_versions)]

use clap::{Args as ClapArgs, Parser, Subcommand};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vigil::app_state::{AppState, View};
use vigil::search::Direction;
use vigil::theme::Theme;
use vigil::{config, library, ui};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Searchable reader for scam and threat awareness articles", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Articles or directories to read (built-in articles if omitted)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Colour theme: dark or light
    #[arg(long)]
    theme: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(ClapArgs)]
struct CommonArgs {
    /// Configuration file (defaults to ./vigil.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the sections matching a query as JSON
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Articles or directories to search (built-in articles if omitted)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

fn init_logging(log: Option<&Path>, stderr_fallback: bool) -> vigil::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vigil=info"));

    if let Some(path) = log {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else if stderr_fallback {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

fn load_config(common: &CommonArgs) -> vigil::Result<config::Config> {
    let mut cfg = config::Config::load(common.config.as_deref())?;

    // Override config with command line args
    if !common.ext.is_empty() {
        cfg.file_extensions.clone_from(&common.ext);
    }
    Ok(cfg)
}

fn run(args: Args) -> vigil::Result<()> {
    if let Some(Command::Search {
        query,
        paths,
        common,
    }) = args.command
    {
        init_logging(common.log.as_deref(), true)?;
        let cfg = load_config(&common)?;
        let articles = library::load(paths, &cfg.file_extensions)?;
        let report = library::search_all(&articles, &query);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    init_logging(args.common.log.as_deref(), false)?;
    let mut cfg = load_config(&args.common)?;
    if let Some(theme) = args.theme {
        cfg.theme = theme;
    }

    let articles = library::load(args.paths, &cfg.file_extensions)?;
    tracing::info!(articles = articles.len(), "starting reader");

    let theme = Theme::by_name(&cfg.theme);
    let state = AppState::new(articles, cfg.highlight_duration());
    run_tui(state, &theme)?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_tui(mut app: AppState, theme: &Theme) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, theme);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "reader exited with an error");
    }
    result
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    theme: &Theme,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        // Wake up in time for a pending highlight to lapse.
        if !event::poll(app.poll_timeout(Instant::now()))? {
            app.tick(Instant::now());
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.current_view {
                View::ArticleList => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up => {
                        if let Some(prev) = app.find_prev_article() {
                            app.current_article_index = prev;
                        }
                    }
                    KeyCode::Down => {
                        if let Some(next) = app.find_next_article() {
                            app.current_article_index = next;
                        }
                    }
                    KeyCode::Enter => app.open_article(app.current_article_index),
                    _ => {}
                },
                View::Reader if app.search.is_open() => match key.code {
                    KeyCode::Esc => app.toggle_search(),
                    KeyCode::Enter => app.search_select(),
                    KeyCode::Down | KeyCode::Tab => {
                        app.search_navigate(Direction::Next, Instant::now());
                    }
                    KeyCode::Up | KeyCode::BackTab => {
                        app.search_navigate(Direction::Prev, Instant::now());
                    }
                    KeyCode::Backspace => app.search_backspace(),
                    KeyCode::Char('/') => app.search_slash(),
                    KeyCode::Char(c) => app.search_input(c),
                    _ => {}
                },
                View::Reader => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        if app.back() {
                            return Ok(());
                        }
                    }
                    KeyCode::Char('/') => app.toggle_search(),
                    KeyCode::Up => {
                        if let Some(prev) = app.find_prev_section() {
                            app.go_to_section(prev);
                        }
                    }
                    KeyCode::Down => {
                        if let Some(next) = app.find_next_section() {
                            app.go_to_section(next);
                        }
                    }
                    KeyCode::Home => app.go_to_section(0),
                    KeyCode::End => {
                        let last = app
                            .current_article()
                            .map_or(0, |a| a.sections.len().saturating_sub(1));
                        app.go_to_section(last);
                    }
                    _ => {}
                },
            }
        }

        app.tick(Instant::now());
    }
}
