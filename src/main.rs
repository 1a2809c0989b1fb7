//! folio: A terminal portfolio with scroll-tracked section navigation.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use edtui::{EditorEventHandler, EditorMode};
use folio::app_state::{AppState, View};
use folio::contact::{ContactEndpoint, Field, HttpEndpoint};
use folio::content::{self, Document};
use folio::layout::layout_document;
use folio::theme::Theme;
use folio::{config, logging, ui};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio with scroll-tracked section navigation", long_about = None)]
struct Args {
    /// Portfolio markdown file (defaults to the built-in page)
    #[arg(value_name = "PATH")]
    content: Option<PathBuf>,

    /// URL the contact form posts to
    #[arg(long)]
    endpoint: Option<String>,

    /// Colour scheme: light or dark
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Rows left above a section heading when navigating to it
    #[arg(long, value_name = "ROWS")]
    header_offset: Option<usize>,

    /// Write tracing output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the section registry as JSON and exit
    #[arg(long)]
    sections: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(endpoint) = args.endpoint {
        cfg.endpoint = endpoint;
    }
    if let Some(offset) = args.header_offset {
        cfg.header_offset = offset;
    }
    if let Some(theme) = args.theme {
        cfg.theme = Some(theme);
    }
    let log_file = args.log_file.or_else(|| cfg.log_file.as_ref().map(PathBuf::from));
    logging::init(log_file.as_deref())?;

    let content_path = args.content.or_else(|| cfg.content.as_ref().map(PathBuf::from));
    let document = load(content_path.as_deref())?;

    if args.sections {
        let layout = layout_document(&document, cfg.wrap_width);
        let json = serde_json::to_string_pretty(&layout.registry).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if document.section_ids().next().is_none() {
        eprintln!("No sections found in document (headings need an {{#id}} suffix)");
        return Ok(());
    }

    let theme = match cfg.theme.as_deref() {
        Some(name) => Theme::parse(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, detecting from terminal");
            Theme::detect()
        }),
        None => Theme::detect(),
    };
    let endpoint: Arc<dyn ContactEndpoint> =
        Arc::new(HttpEndpoint::new(cfg.endpoint.clone()).map_err(io::Error::other)?);

    tracing::info!(
        sections = document.section_ids().count(),
        endpoint = %cfg.endpoint,
        "starting folio"
    );
    run_tui(document, &cfg, theme, endpoint)
}

fn load(path: Option<&Path>) -> io::Result<Document> {
    let parsed = match path {
        Some(path) => content::load_document(path),
        None => content::parse_document(content::DEFAULT_PORTFOLIO),
    };
    parsed.map_err(io::Error::other)
}

fn run_tui(
    document: Document,
    cfg: &config::Config,
    theme: Theme,
    endpoint: Arc<dyn ContactEndpoint>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = terminal.size().and_then(|size| {
        let mut app = AppState::new(document, cfg, theme, endpoint, size.width, size.height);
        let mut editor_handler = EditorEventHandler::default();
        run_app(&mut terminal, &mut app, cfg, &mut editor_handler)
    });

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "event loop failed");
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(cfg.tick())? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let quit = match app.view {
                    View::Browse => browse_key(app, key),
                    View::Contact => {
                        contact_key(app, key, editor_handler);
                        false
                    }
                };
                if quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.scroll_by(WHEEL_ROWS),
                MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_ROWS),
                _ => {}
            },
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}

/// Handles a key while browsing. Returns whether to quit.
fn browse_key(app: &mut AppState, key: KeyEvent) -> bool {
    let now = Instant::now();
    app.message = None;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page(true),
        KeyCode::PageUp => app.page(false),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_by(isize::MIN / 2),
        KeyCode::End | KeyCode::Char('G') => app.scroll_by(isize::MAX / 2),
        KeyCode::Tab => app.move_menu_cursor(true),
        KeyCode::BackTab => app.move_menu_cursor(false),
        KeyCode::Enter => {
            app.navigate_menu(now);
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = "123456789".find(c) {
                app.navigate_nth(n, now);
            }
        }
        // Hero call-to-action shortcuts
        KeyCode::Char('p') => {
            app.navigate_to("projects", now);
        }
        KeyCode::Char('c') => {
            app.navigate_to("contact", now);
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        KeyCode::Char('m') => app.toggle_panel(),
        KeyCode::Char('d') => {
            if !app.start_resume(now) {
                app.message = Some("Download already in progress".to_string());
            }
        }
        KeyCode::Char('f') => app.open_contact_form(),
        KeyCode::Esc => {
            if app.panel_open {
                app.toggle_panel();
            }
        }
        _ => {}
    }
    false
}

fn contact_key(app: &mut AppState, key: KeyEvent, editor_handler: &mut EditorEventHandler) {
    let now = Instant::now();
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_contact(now);
        }
        KeyCode::Tab => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab => app.form.focus = app.form.focus.prev(),
        KeyCode::Enter if app.form.focus != Field::Message => {
            app.form.focus = app.form.focus.next();
        }
        KeyCode::Esc => {
            if app.form.focus == Field::Message && app.form.message.mode != EditorMode::Normal {
                editor_handler.on_key_event(key, &mut app.form.message);
            } else {
                app.close_contact_form();
            }
        }
        _ => {
            if let Some(input) = app.form.focused_input() {
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.push(c);
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    _ => {}
                }
            } else {
                editor_handler.on_key_event(key, &mut app.form.message);
            }
        }
    }
}
