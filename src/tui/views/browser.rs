//! Predicate browser — the single main view.
//!
//! Search bar with debounced input, category toggle panel, and the
//! filtered results rendered as cards or as a list. The view owns the
//! catalog and the selection state; every input that changes the selection
//! re-runs the filter engine and the projector, and rendering only ever
//! reads the cached projection.
//!
//! Copying is dispatched upward as a typed result — the view never touches
//! the terminal writer itself.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::catalog::{Catalog, Category};
use crate::core::filter::{filter, Selection, ViewMode};
use crate::core::project::{project, Projection, RenderItem};
use crate::tui::layout::split_browser;
use crate::tui::theme::Theme;
use crate::tui::widgets::search_input::SearchInput;
use crate::tui::widgets::syntax::highlight_ruby;

// ── Layout constants ────────────────────────────────────────────────────────

/// Total height of one card (borders + inner lines).
const CARD_HEIGHT: u16 = 8;
/// Minimum card width before the grid adds a column.
const CARD_MIN_WIDTH: u16 = 40;
/// Height of the list-mode preview pane.
const PREVIEW_HEIGHT: u16 = 6;
/// Ticks the selected item's border flashes after a copy.
const COPY_FLASH_TICKS: u8 = 10;

const EMPTY_STATE_TEXT: &str = "No predicates found matching your criteria.";

// ── Focus zones ─────────────────────────────────────────────────────────────

/// Which area currently has keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusZone {
    /// Results — j/k select, `/` to search, `f` for filters.
    Results,
    /// Search bar is active — typing edits the search buffer.
    Search,
    /// Filter panel — j/k move, Space toggles a category.
    Filters,
}

/// Outcome of input handling, for the composing layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserResult {
    Consumed,
    /// User requested a copy of the selected item's payload.
    Copy { name: String, payload: String },
}

// ── State ───────────────────────────────────────────────────────────────────

pub struct BrowserState {
    catalog: Catalog,
    selection: Selection,
    search: SearchInput,
    /// Current projection of the filtered working set. Rebuilt on every
    /// selection change, never per frame.
    projection: Projection,
    /// Highlighted example snippets keyed by record name. Cleared when the
    /// theme switches.
    example_lines: HashMap<String, Vec<Line<'static>>>,
    dark: bool,
    focus: FocusZone,
    /// Cursor into `Category::ALL` in the filter panel.
    filter_cursor: usize,
    /// Selected index into the projection items.
    selected: usize,

    // ── Debounce state ──────────────────────────────────────────────
    debounce: Duration,
    /// True when the search input has changed but we haven't re-filtered.
    search_pending: bool,
    /// Timestamp of the last search input edit.
    last_search_edit: Option<Instant>,

    copy_flash_ticks: u8,
}

impl BrowserState {
    pub fn new(catalog: Catalog, debounce: Duration, dark: bool) -> Self {
        let mut state = Self {
            catalog,
            selection: Selection::new(),
            search: SearchInput::new(),
            projection: Projection::Empty,
            example_lines: HashMap::new(),
            dark,
            focus: FocusZone::Results,
            filter_cursor: 0,
            selected: 0,
            debounce,
            search_pending: false,
            last_search_edit: None,
            copy_flash_ticks: 0,
        };
        state.refilter();
        state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.selection.view_mode()
    }

    pub fn result_count(&self) -> usize {
        self.projection.items().len()
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Switch the highlight theme; cached example lines are stale.
    pub fn set_theme_dark(&mut self, dark: bool) {
        if self.dark != dark {
            self.dark = dark;
            self.example_lines.clear();
            self.refilter();
        }
    }

    fn current_item(&self) -> Option<&RenderItem> {
        self.projection.items().get(self.selected)
    }

    /// Re-run the filter engine and the projector from the current
    /// selection, refreshing the highlight cache for visible records.
    fn refilter(&mut self) {
        let filtered = filter(&self.catalog, &self.selection);
        for record in &filtered {
            if !self.example_lines.contains_key(&record.name) {
                self.example_lines.insert(
                    record.name.clone(),
                    highlight_ruby(&record.example, self.dark),
                );
            }
        }
        self.projection = project(&filtered, self.selection.view_mode());
        let len = self.projection.items().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Apply the search buffer to the selection and recompute.
    fn run_search(&mut self) {
        self.search_pending = false;
        self.selection.set_search_term(self.search.text());
        self.refilter();
    }

    /// Mark the search input dirty, starting the debounce window.
    fn mark_search_dirty(&mut self) {
        self.search_pending = true;
        self.last_search_edit = Some(Instant::now());
    }

    /// Tick hook: fire the debounced search once input quiesces, decay the
    /// copy flash.
    pub fn poll(&mut self) {
        if self.search_pending {
            if let Some(ts) = self.last_search_edit {
                if ts.elapsed() >= self.debounce {
                    self.run_search();
                }
            }
        }
        self.copy_flash_ticks = self.copy_flash_ticks.saturating_sub(1);
    }

    // ── Input handling ──────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<BrowserResult> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return None;
        };

        match self.focus {
            FocusZone::Search => self.handle_search_input(*modifiers, *code),
            FocusZone::Filters => self.handle_filters_input(*modifiers, *code),
            FocusZone::Results => self.handle_results_input(*modifiers, *code),
        }
    }

    fn handle_search_input(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
    ) -> Option<BrowserResult> {
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                // Leaving the search bar applies the pending edit at once.
                self.focus = FocusZone::Results;
                self.run_search();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.mark_search_dirty();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert_char(c);
                self.mark_search_dirty();
                Some(BrowserResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_filters_input(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
    ) -> Option<BrowserResult> {
        if modifiers != KeyModifiers::NONE {
            return None;
        }
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.filter_cursor + 1 < Category::ALL.len() {
                    self.filter_cursor += 1;
                }
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                // Toggles recompute immediately — no debounce for discrete
                // low-frequency actions.
                self.selection
                    .toggle_category(Category::ALL[self.filter_cursor]);
                self.refilter();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Tab => {
                self.focus = FocusZone::Results;
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('/') => {
                self.focus = FocusZone::Search;
                Some(BrowserResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_results_input(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
    ) -> Option<BrowserResult> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match code {
            KeyCode::Char('/') => {
                self.focus = FocusZone::Search;
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('f') | KeyCode::Tab => {
                self.focus = FocusZone::Filters;
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('v') => {
                self.selection.set_view_mode(self.view_mode().toggled());
                self.refilter();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('1') => {
                self.selection.set_view_mode(ViewMode::Cards);
                self.refilter();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('2') => {
                self.selection.set_view_mode(ViewMode::List);
                self.refilter();
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.result_count();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('G') => {
                self.selected = self.result_count().saturating_sub(1);
                Some(BrowserResult::Consumed)
            }
            KeyCode::Char('y') => {
                let item = self.current_item()?;
                let result = BrowserResult::Copy {
                    name: item.name.clone(),
                    payload: item.copy_payload.clone(),
                };
                self.copy_flash_ticks = COPY_FLASH_TICKS;
                Some(result)
            }
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);
        self.render_search_bar(frame, rows[0], theme);

        let (filter_area, results_area) = split_browser(rows[1]);
        if let Some(filter_area) = filter_area {
            self.render_filter_panel(frame, filter_area, theme);
        }
        self.render_results(frame, results_area, theme);
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == FocusZone::Search;
        let block = if focused {
            theme.block_focused("Search")
        } else {
            theme.block_default("Search")
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if self.search.is_empty() && !focused {
            Line::from(Span::styled(
                " Press / to search predicates",
                theme.muted(),
            ))
        } else {
            let mut spans = vec![
                Span::styled(" \u{1f50d} ", theme.muted()),
                Span::styled(self.search.text().to_string(), Style::default().fg(theme.text)),
            ];
            if focused {
                spans.push(Span::styled("\u{2588}", theme.border_focused()));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), inner);
    }

    /// Summary of the active category selection, shown as the panel title.
    fn filter_summary(&self) -> String {
        let selected = self.selection.selected_categories();
        match selected.len() {
            0 => "All categories".to_string(),
            1 => selected
                .iter()
                .next()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            n => format!("{n} selected"),
        }
    }

    fn render_filter_panel(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == FocusZone::Filters;
        let summary = self.filter_summary();
        let block = if focused {
            theme.block_focused(&summary)
        } else {
            theme.block_default(&summary)
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, category) in Category::ALL.iter().copied().enumerate() {
            let marker = if focused && i == self.filter_cursor {
                "\u{25b8} "
            } else {
                "  "
            };
            let checkbox = if self.selection.is_selected(category) {
                "[x] "
            } else {
                "[ ] "
            };
            let count = self
                .catalog
                .records()
                .iter()
                .filter(|r| r.category == category)
                .count();

            let label_style = if self.selection.is_selected(category) {
                Style::default()
                    .fg(theme.category_color(category))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), theme.highlight()),
                Span::styled(checkbox.to_string(), label_style),
                Span::styled(category.label().to_string(), label_style),
                Span::styled(format!(" ({count})"), theme.dim()),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " [Space] toggle",
            theme.key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &self.projection {
            Projection::Empty => self.render_empty_state(frame, area, theme),
            Projection::Cards(items) => self.render_cards(frame, area, items, theme),
            Projection::List(items) => self.render_list(frame, area, items, theme),
        }
    }

    fn render_empty_state(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = theme.block_default("Predicates");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(EMPTY_STATE_TEXT, theme.muted())),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, items: &[RenderItem], theme: &Theme) {
        let cols = (area.width / CARD_MIN_WIDTH).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = self.selected / cols;

        // Keep the selected card on screen; scrolling follows selection.
        let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));

        let row_chunks = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (row_offset, row_area) in row_chunks.iter().enumerate() {
            let row = first_row + row_offset;
            let start = row * cols;
            if start >= items.len() {
                break;
            }
            let col_chunks = Layout::horizontal(vec![
                Constraint::Ratio(1, cols as u32);
                cols
            ])
            .split(*row_area);
            for (col, col_area) in col_chunks.iter().enumerate() {
                let index = start + col;
                if let Some(item) = items.get(index) {
                    self.render_card(frame, *col_area, item, index == self.selected, theme);
                }
            }
        }
    }

    fn render_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        item: &RenderItem,
        selected: bool,
        theme: &Theme,
    ) {
        let border_style = if selected && self.copy_flash_ticks > 0 {
            Style::default().fg(theme.success)
        } else if selected {
            theme.border_focused()
        } else {
            theme.border_default()
        };

        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", item.name),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", item.category_label),
                Style::default().fg(theme.category_color(item.category)),
            ),
        ]);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(
                format!(" {}", item.description),
                theme.muted(),
            )),
            Line::from(vec![
                Span::styled(" # ", theme.dim()),
                Span::styled(
                    item.syntax.clone(),
                    Style::default().fg(theme.primary_light),
                ),
            ]),
            Line::raw(""),
        ];
        if let Some(example) = self.example_lines.get(&item.name) {
            lines.extend(example.iter().cloned());
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, items: &[RenderItem], theme: &Theme) {
        let has_preview = area.height > PREVIEW_HEIGHT + 4;
        let (list_area, preview_area) = if has_preview {
            let rows = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(PREVIEW_HEIGHT),
            ])
            .split(area);
            (rows[0], Some(rows[1]))
        } else {
            (area, None)
        };

        let focused = self.focus == FocusZone::Results;
        let block = if focused {
            theme.block_focused("Predicates")
        } else {
            theme.block_default("Predicates")
        };
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);

        // Keep the selected row on screen; scrolling follows selection.
        let visible = inner.height as usize;
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (i, item) in items.iter().enumerate().skip(first).take(visible) {
            let is_selected = i == self.selected;
            let marker = if is_selected && focused { "\u{25b8} " } else { "  " };
            let name_style = if is_selected {
                theme.highlight()
            } else {
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), theme.highlight()),
                Span::styled(format!("{:<20}", item.name), name_style),
                Span::styled(
                    format!("{:<12}", item.category_label),
                    Style::default().fg(theme.category_color(item.category)),
                ),
                Span::styled(item.description.clone(), theme.muted()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(preview_area) = preview_area {
            self.render_preview(frame, preview_area, theme);
        }
    }

    /// Syntax + example of the selected record under the list.
    fn render_preview(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(item) = self.current_item() else {
            return;
        };
        let border_style = if self.copy_flash_ticks > 0 {
            Style::default().fg(theme.success)
        } else {
            theme.border_default()
        };
        let block = Block::default()
            .title(format!(" {} ", item.syntax))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        if let Some(example) = self.example_lines.get(&item.name) {
            lines.extend(example.iter().cloned());
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
