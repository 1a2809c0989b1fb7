//! The UI renders the application state into the sidebar, the page and the status bar.
//!
//! The draw function dispatches on the current view. Browsing shows the docked sidebar (or the
//! compact panel when open) next to the scrolled document; the contact view overlays the form.

use crate::app_state::{AppState, View, SIDEBAR_WIDTH, STATUS_HEIGHT};
use crate::contact::{Field, StatusKind};
use crate::layout::LineKind;
use crate::theme::Palette;
use edtui::{EditorTheme, EditorView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let palette = app.theme().palette();
    let base = Style::default().fg(palette.foreground).bg(palette.background);
    f.render_widget(Block::default().style(base), f.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(f.area());

    if app.compact {
        draw_document(f, app, &palette, rows[0]);
        if app.panel_open {
            let panel = Rect {
                width: SIDEBAR_WIDTH.min(rows[0].width),
                ..rows[0]
            };
            f.render_widget(Clear, panel);
            draw_sidebar(f, app, &palette, panel);
        }
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        draw_sidebar(f, app, &palette, columns[0]);
        draw_document(f, app, &palette, columns[1]);
    }

    if app.view == View::Contact {
        draw_contact(f, app, &palette, rows[0]);
    }

    draw_status(f, app, &palette, rows[1]);
}

fn draw_sidebar(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .style(Style::default().bg(palette.background))
        .title("folio");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::BOTTOM))
        .gauge_style(Style::default().fg(palette.accent_alt))
        .percent(u16::from(app.resume.progress()))
        .label(app.resume.label());
    f.render_widget(gauge, chunks[0]);

    let active = app.active_section();
    let items: Vec<ListItem> = app
        .menu
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_active = active.as_deref() == Some(item.target.as_str());
            let marker = if is_active { "▌ " } else { "  " };
            let mut style = if is_active {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            if i == app.menu_index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::raw(format!("{} ", i + 1)),
                Span::raw(item.label.clone()),
            ]))
            .style(style)
        })
        .collect();

    f.render_widget(List::new(items), chunks[1]);
}

fn draw_document(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let active = app.active_section();
    let title = active
        .as_deref()
        .and_then(|id| app.layout.registry.get(id))
        .map_or_else(String::new, |s| s.title.clone());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .padding(Padding::horizontal(2))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let start = app.scroller.row();
    let lines: Vec<Line> = app
        .layout
        .lines
        .iter()
        .skip(start)
        .take(usize::from(inner.height))
        .map(|line| match line.kind {
            LineKind::Heading(1) => Line::styled(
                line.text.to_uppercase(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            LineKind::Heading(2) => Line::styled(
                line.text.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            LineKind::Heading(_) => Line::styled(
                line.text.clone(),
                Style::default()
                    .fg(palette.accent_alt)
                    .add_modifier(Modifier::BOLD),
            ),
            LineKind::Body => Line::raw(line.text.clone()),
            LineKind::Blank => Line::default(),
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_contact(f: &mut Frame, app: &mut AppState, palette: &Palette, area: Rect) {
    let popup = centered(area, 72, 22);
    f.render_widget(Clear, popup);

    let title = if app.contact.submitting {
        "Send me a message (sending...)"
    } else {
        "Send me a message"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().fg(palette.foreground).bg(palette.background))
        .title(title);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(3), // Subject
            Constraint::Min(3),    // Message
        ])
        .split(inner);

    let focus = app.form.focus;
    let field_block = |field: Field| {
        let style = if focus == field {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.muted)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(field.label())
    };

    for (chunk, field, value) in [
        (chunks[0], Field::Name, app.form.name.as_str()),
        (chunks[1], Field::Email, app.form.email.as_str()),
        (chunks[2], Field::Subject, app.form.subject.as_str()),
    ] {
        let text = if focus == field {
            format!("{value}▏")
        } else {
            value.to_string()
        };
        f.render_widget(Paragraph::new(text).block(field_block(field)), chunk);
    }

    let message_block = field_block(Field::Message);
    let message_area = message_block.inner(chunks[3]);
    f.render_widget(message_block, chunks[3]);
    let editor = EditorView::new(&mut app.form.message)
        .theme(EditorTheme::default())
        .wrap(true);
    f.render_widget(editor, message_area);
}

fn draw_status(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let (text, style) = if let Some(status) = &app.contact.status {
        let colour = match status.kind {
            StatusKind::Success => palette.success,
            StatusKind::Error => palette.error,
        };
        (status.text.clone(), Style::default().fg(colour))
    } else if let Some(msg) = &app.message {
        (msg.clone(), Style::default().fg(palette.foreground))
    } else if app.view == View::Contact {
        (
            "Tab: Next field | Ctrl+S: Send | Esc: Back (message editor: Esc for normal mode first)"
                .to_string(),
            Style::default().fg(palette.muted),
        )
    } else {
        let panel = if app.compact { " | m: Menu" } else { "" };
        (
            format!(
                "↑/↓: Scroll | Tab/Enter: Navigate | 1-{}: Jump | t: Theme | d: CV | f: Contact{panel} | q: Quit",
                app.menu.len()
            ),
            Style::default().fg(palette.muted),
        )
    };

    let status = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted)),
    );
    f.render_widget(status, area);
}
