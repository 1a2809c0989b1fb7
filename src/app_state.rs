//! The top-level coordinator tying layout, observation, navigation and the form together.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user scrolls
//! and navigates. `AppState` owns the scroll position, the observation source and the mounted
//! visibility tracker, and hands read-only views of the active section and theme to the UI.
//! Mounting happens in [`AppState::new`]; the tracker subscription is released when the state is
//! unmounted or dropped.

use crate::config::Config;
use crate::contact::{ContactEndpoint, ContactForm, ContactSession};
use crate::content::Document;
use crate::layout::{layout_document, DocumentLayout};
use crate::navigator::{ScrollNavigator, SmoothScroll};
use crate::resume::ResumeDownload;
use crate::state::StateReader;
use crate::theme::{Theme, ThemeToggle};
use crate::tracker::{ActiveSection, TrackerHandle, VisibilityTracker};
use crate::viewport::{ObservationSource, ObserverOptions, Viewport};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Columns taken by the sidebar when it is docked.
pub const SIDEBAR_WIDTH: u16 = 32;

/// Rows taken by the status bar.
pub const STATUS_HEIGHT: u16 = 3;

/// Rows and columns taken by the border and padding around the document.
const PANE_CHROME: u16 = 2;

/// Horizontal padding inside the document pane.
const PANE_PADDING: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Scrolling the page and using the sidebar.
    Browse,
    /// Filling in the contact form.
    Contact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Sidebar entry pointing at a section.
pub struct MenuItem {
    /// Text shown in the sidebar.
    pub label: String,
    /// Section the entry navigates to.
    pub target: String,
}

/// Bridges the laid out document, the visibility tracker and the interactive widgets.
pub struct AppState {
    /// Parsed portfolio.
    pub document: Document,
    /// Document rows at the current width.
    pub layout: DocumentLayout,
    /// Scroll position of the document pane.
    pub scroller: SmoothScroll,
    /// Section navigation.
    pub navigator: ScrollNavigator,
    /// Sidebar entries, one per section.
    pub menu: Vec<MenuItem>,
    /// Sidebar entry under the keyboard cursor.
    pub menu_index: usize,
    /// Whether the terminal is too narrow for a docked sidebar.
    pub compact: bool,
    /// Whether the compact navigation panel is showing.
    pub panel_open: bool,
    /// Active UI screen determining input handling.
    pub view: View,
    /// Contact form contents.
    pub form: ContactForm,
    /// Contact submission state.
    pub contact: ContactSession,
    /// CV download button.
    pub resume: ResumeDownload,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Rows visible in the document pane.
    pub viewport_height: usize,
    source: ObservationSource,
    tracker: Option<TrackerHandle>,
    active: StateReader<ActiveSection>,
    theme_toggle: ThemeToggle,
    theme: StateReader<Theme>,
    options: ObserverOptions,
    wrap_width: usize,
    compact_width: u16,
    panel_close_delay: Duration,
    panel_close_at: Option<Instant>,
}

impl AppState {
    #[must_use]
    /// Lays out `document` for a `width` x `height` terminal and mounts the visibility tracker.
    pub fn new(
        document: Document,
        cfg: &Config,
        theme: Theme,
        endpoint: Arc<dyn ContactEndpoint>,
        width: u16,
        height: u16,
    ) -> Self {
        let compact = width < cfg.compact_width;
        let layout = layout_document(&document, content_width(width, compact, cfg.wrap_width));
        let menu = layout
            .registry
            .iter()
            .map(|s| MenuItem {
                label: s.title.clone(),
                target: s.id.clone(),
            })
            .collect();
        let (theme_toggle, theme) = ThemeToggle::new(theme);
        let (tracker, active) = VisibilityTracker::new();
        let source = ObservationSource::new();
        let options = cfg.observer_options();
        let tracker = tracker.mount(&source, &layout.registry, options.clone());

        let mut app = Self {
            document,
            layout,
            scroller: SmoothScroll::new(),
            navigator: ScrollNavigator::new(cfg.header_offset, cfg.scroll_duration()),
            menu,
            menu_index: 0,
            compact,
            panel_open: false,
            view: View::Browse,
            form: ContactForm::default(),
            contact: ContactSession::new(endpoint, cfg.status_dismiss()),
            resume: ResumeDownload::new(
                cfg.resume_path.as_ref().map(PathBuf::from),
                PathBuf::from(&cfg.download_dir),
            ),
            message: None,
            viewport_height: viewport_height(height),
            source,
            tracker: Some(tracker),
            active,
            theme_toggle,
            theme,
            options,
            wrap_width: cfg.wrap_width,
            compact_width: cfg.compact_width,
            panel_close_delay: cfg.panel_close_delay(),
            panel_close_at: None,
        };
        app.observe();
        app
    }

    /// Releases the tracker subscription. Later scrolling no longer changes the active section.
    pub fn unmount(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.unmount();
        }
    }

    /// Re-mounts the tracker against the current layout if it was unmounted.
    pub fn remount(&mut self) {
        if self.tracker.is_some() {
            return;
        }
        let (tracker, active) = VisibilityTracker::new();
        self.tracker = Some(tracker.mount(&self.source, &self.layout.registry, self.options.clone()));
        self.active = active;
        self.observe();
    }

    #[must_use]
    /// Whether the tracker is currently observing.
    pub fn is_mounted(&self) -> bool {
        self.tracker.is_some()
    }

    #[must_use]
    /// Id of the section the sidebar highlights.
    pub fn active_section(&self) -> ActiveSection {
        self.active.get()
    }

    #[must_use]
    /// Reader of the active section for components that track changes.
    pub fn active_reader(&self) -> StateReader<ActiveSection> {
        self.active.clone()
    }

    #[must_use]
    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Flips between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme_toggle.toggle()
    }

    #[must_use]
    /// Visible window onto the document.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroller.position(),
            height: self.viewport_height,
        }
    }

    #[must_use]
    /// Largest row the document can scroll to.
    pub fn max_scroll(&self) -> usize {
        self.layout.max_scroll(self.viewport_height)
    }

    /// Measures the viewport against every section and lets the tracker resolve the result.
    pub fn observe(&mut self) -> usize {
        self.source.notify(&self.layout.registry, &self.viewport())
    }

    /// Adapts to a new terminal size: re-wraps the document and re-measures visibility.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.compact = width < self.compact_width;
        if !self.compact {
            self.panel_open = false;
            self.panel_close_at = None;
        }
        self.viewport_height = viewport_height(height);
        let wrap = content_width(width, self.compact, self.wrap_width);
        if wrap != self.layout.width {
            self.layout = layout_document(&self.document, wrap);
        }
        #[allow(clippy::cast_precision_loss)]
        self.scroller.clamp(self.max_scroll() as f64);
        self.observe();
    }

    #[allow(clippy::cast_precision_loss)]
    /// Manual scroll by `rows`; stops any smooth scroll in flight.
    pub fn scroll_by(&mut self, rows: isize) {
        self.scroller
            .scroll_by(rows as f64, self.max_scroll() as f64);
        self.observe();
    }

    #[allow(clippy::cast_possible_wrap)]
    /// Scrolls by one viewport height, up or down.
    pub fn page(&mut self, down: bool) {
        let rows = self.viewport_height.saturating_sub(1).max(1) as isize;
        self.scroll_by(if down { rows } else { -rows });
    }

    /// Smoothly scrolls to section `id`, leaving `header_offset` rows above it.
    ///
    /// Unknown ids are ignored. When the compact panel is open it closes after a short delay so
    /// its exit does not race the scroll.
    pub fn navigate_to(&mut self, id: &str, now: Instant) -> bool {
        let viewport = self.viewport();
        let max_scroll = self.max_scroll();
        let started = self.navigator.navigate(
            &self.layout.registry,
            &mut self.scroller,
            &viewport,
            max_scroll,
            id,
            now,
        );
        if started {
            if let Some(index) = self.menu.iter().position(|m| m.target == id) {
                self.menu_index = index;
            }
        }
        if self.compact && self.panel_open {
            self.panel_close_at = Some(now + self.panel_close_delay);
        }
        started
    }

    /// Navigates to the sidebar entry under the cursor.
    pub fn navigate_menu(&mut self, now: Instant) -> bool {
        match self.menu.get(self.menu_index).map(|m| m.target.clone()) {
            Some(target) => self.navigate_to(&target, now),
            None => false,
        }
    }

    /// Navigates to the `n`th sidebar entry (zero-based).
    pub fn navigate_nth(&mut self, n: usize, now: Instant) -> bool {
        if n >= self.menu.len() {
            return false;
        }
        self.menu_index = n;
        self.navigate_menu(now)
    }

    /// Moves the sidebar cursor, wrapping around.
    pub fn move_menu_cursor(&mut self, forward: bool) {
        if self.menu.is_empty() {
            return;
        }
        let len = self.menu.len();
        self.menu_index = if forward {
            (self.menu_index + 1) % len
        } else {
            (self.menu_index + len - 1) % len
        };
    }

    /// Opens or closes the compact navigation panel.
    pub fn toggle_panel(&mut self) {
        if self.compact {
            self.panel_open = !self.panel_open;
            self.panel_close_at = None;
        }
    }

    /// Switches to the contact form.
    pub fn open_contact_form(&mut self) {
        self.view = View::Contact;
        self.panel_open = false;
    }

    /// Returns to browsing, keeping whatever was typed.
    pub fn close_contact_form(&mut self) {
        self.view = View::Browse;
    }

    /// Sends the contact form in the background.
    pub fn submit_contact(&mut self, now: Instant) -> bool {
        self.contact.submit(&self.form, now)
    }

    /// Starts the CV download progress run.
    pub fn start_resume(&mut self, now: Instant) -> bool {
        self.resume.start(now)
    }

    /// Advances animations and timers to `now`.
    ///
    /// Order matters: the scroll moves first so the tracker sees this tick's position, then
    /// background results and timers are settled.
    pub fn tick(&mut self, now: Instant) {
        if self.scroller.tick(now) {
            self.observe();
        }

        if self.panel_close_at.is_some_and(|at| now >= at) {
            self.panel_open = false;
            self.panel_close_at = None;
        }

        if self.contact.poll(now) == Some(true) {
            self.form.clear();
        }
        self.contact.expire(now);

        if let Some(outcome) = self.resume.tick(now) {
            self.message = Some(match outcome {
                Ok(path) => format!("CV saved to {}", path.display()),
                Err(e) => e.to_string(),
            });
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn viewport_height(terminal_height: u16) -> usize {
    usize::from(terminal_height.saturating_sub(STATUS_HEIGHT + PANE_CHROME)).max(1)
}

fn content_width(terminal_width: u16, compact: bool, wrap_width: usize) -> usize {
    let sidebar = if compact { 0 } else { SIDEBAR_WIDTH };
    let pane = terminal_width.saturating_sub(sidebar + PANE_CHROME + PANE_PADDING * 2);
    usize::from(pane).clamp(1, wrap_width.max(1))
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
