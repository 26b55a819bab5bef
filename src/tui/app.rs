//! Central application state and the Elm-architecture event loop.
//!
//! Render → select → update. The only event sources are the terminal input
//! stream and the tick interval; all state lives here and in the browser
//! view, owned by this single logical actor.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::AppConfig;
use crate::core::catalog::{Catalog, CatalogError};
use crate::core::clipboard::Clipboard;
use crate::core::filter::ViewMode;
use crate::core::prefs::{PrefsStore, ThemePref};
use crate::tui::events::{Action, AppEvent, Notification, NotificationLevel};
use crate::tui::layout::AppLayout;
use crate::tui::theme::Theme;
use crate::tui::views::browser::{BrowserResult, BrowserState};

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// The browser view, or the load error that replaces it. No partial
    /// catalog is ever rendered.
    browser: Result<BrowserState, CatalogError>,
    theme: Theme,
    theme_pref: ThemePref,
    prefs: PrefsStore,
    clipboard: Clipboard,
    /// Whether the help modal is open.
    show_help: bool,
    /// Active notifications (max 3 visible).
    notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_prefs(config, PrefsStore::default_location())
    }

    fn with_prefs(config: &AppConfig, prefs: PrefsStore) -> Self {
        let theme_pref = prefs.load_theme();
        let theme = Theme::for_pref(theme_pref);

        let debounce = Duration::from_millis(config.tui.search_debounce_ms);
        let browser = Catalog::load_bundled().map(|catalog| {
            BrowserState::new(catalog, debounce, theme_pref == ThemePref::Dark)
        });
        if let Err(ref e) = browser {
            log::error!("Catalog load failed: {e}");
        }

        Self {
            running: true,
            browser,
            theme,
            theme_pref,
            prefs,
            clipboard: Clipboard::detect(),
            show_help: false,
            notifications: Vec::new(),
            notification_counter: 0,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Browser view
                if let Ok(ref mut browser) = self.browser {
                    match browser.handle_input(&crossterm_event) {
                        Some(BrowserResult::Consumed) => return,
                        Some(BrowserResult::Copy { name, payload }) => {
                            self.copy_to_clipboard(&name, &payload);
                            return;
                        }
                        None => {}
                    }
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('t') => Some(Action::ToggleTheme),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::ToggleTheme => {
                self.theme_pref = self.theme_pref.toggled();
                self.theme = Theme::for_pref(self.theme_pref);
                self.prefs.save_theme(self.theme_pref);
                if let Ok(ref mut browser) = self.browser {
                    browser.set_theme_dark(self.theme_pref == ThemePref::Dark);
                }
                self.push_notification(
                    format!("Theme: {}", self.theme_pref.as_str()),
                    NotificationLevel::Info,
                );
            }
        }
    }

    /// Place the copy payload on the clipboard, verbatim. Failure is logged
    /// and downgraded to a warning notification — never retried.
    fn copy_to_clipboard(&mut self, name: &str, payload: &str) {
        match self.clipboard.copy(payload, &mut io::stdout()) {
            Ok(()) => {
                log::debug!("Copied syntax for '{name}'");
                self.push_notification(
                    format!("Copied {payload}"),
                    NotificationLevel::Success,
                );
            }
            Err(e) => {
                log::warn!("Clipboard write failed for '{name}': {e}");
                self.push_notification(
                    "Clipboard unavailable".to_string(),
                    NotificationLevel::Warning,
                );
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 40,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, run the
    /// browser's debounce check.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        if let Ok(ref mut browser) = self.browser {
            browser.poll();
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        match self.browser {
            Ok(ref browser) => browser.render(frame, layout.main, &self.theme),
            Err(ref e) => self.render_load_error(frame, layout.main, e),
        }

        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    /// Catalog load failure suppresses normal rendering entirely.
    fn render_load_error(&self, frame: &mut Frame, area: Rect, error: &CatalogError) {
        let theme = &self.theme;
        let block = Block::default()
            .title(" Error ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "Failed to load the predicate catalog.",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(error.to_string(), theme.muted())),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;

        let (mode, counts) = match self.browser {
            Ok(ref browser) => {
                let mode = match browser.view_mode() {
                    ViewMode::Cards => "CARDS",
                    ViewMode::List => "LIST",
                };
                (
                    mode,
                    format!("{}/{}", browser.result_count(), browser.catalog_len()),
                )
            }
            Err(_) => ("ERROR", "-".to_string()),
        };

        let status = Line::from(vec![
            Span::styled(" PREDEX ", theme.brand_badge()),
            Span::raw(" "),
            Span::styled(
                mode,
                Style::default()
                    .fg(theme.primary_light)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" \u{2502} "),
            Span::styled(counts, theme.muted()),
            Span::styled(" predicates", theme.key_hint()),
            Span::raw(" \u{2502} "),
            Span::styled("/", theme.key_hint()),
            Span::raw(":search "),
            Span::styled("f", theme.key_hint()),
            Span::raw(":filters "),
            Span::styled("v", theme.key_hint()),
            Span::raw(":view "),
            Span::styled("y", theme.key_hint()),
            Span::raw(":copy "),
            Span::styled("t", theme.key_hint()),
            Span::raw(":theme "),
            Span::styled("?", theme.key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme.key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let theme = &self.theme;
        let max_width = 40.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("\u{2139}", theme.info),
                    NotificationLevel::Success => ("\u{2713}", theme.success),
                    NotificationLevel::Warning => ("\u{26a0}", theme.warning),
                    NotificationLevel::Error => ("\u{2717}", theme.error),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let modal = centered_rect(50, 70, area);

        let keybindings = [
            ("Results:", ""),
            ("j/k", "Select next / previous predicate"),
            ("g / G", "Jump to first / last"),
            ("v", "Toggle cards/list view"),
            ("1 / 2", "Cards view / list view"),
            ("y", "Copy bare filter suffix"),
            ("/", "Focus search"),
            ("f / Tab", "Focus category filters"),
            ("", ""),
            ("Search:", ""),
            ("Enter / Esc", "Apply and return to results"),
            ("", ""),
            ("Filters:", ""),
            ("j/k", "Move between categories"),
            ("Space / Enter", "Toggle category"),
            ("Esc / h", "Back to results"),
            ("", ""),
            ("Global:", ""),
            ("t", "Toggle dark/light theme"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<16}", key),
                        Style::default()
                            .fg(theme.primary_light)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
