//! Windowed, filterable list of words.
//!
//! [`VirtualList`] owns the three pieces of state the window depends on
//! (source items, query, scroll offset) and recomputes the visible range
//! whenever any of them changes. Only the rows inside the window are ever
//! handed to the row renderer.
//!
//! The scroll offset is measured in abstract units; one row spans
//! [`WindowConfig::item_height`] of them. Changing the query keeps the
//! offset as it is, so a narrowed filter may leave the window empty until
//! the user scrolls again.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use wordscroll_core::command::Command;
use wordscroll_core::component::Component;

use crate::key::{Binding, KeyCombination, KeyMap};
use crate::row::{render_rows, PlainRow, RowRenderer};
use crate::window::{filter_indices, visible_range, VisibleRange, WindowConfig};

/// Messages for the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded by the parent. Ignored unless focused.
    KeyPress(KeyEvent),
    /// One wheel tick.
    MouseWheel { up: bool },
    /// Scroll by a signed number of rows.
    ScrollBy(i64),
    /// Scroll to an absolute offset, clamped to the last row.
    ScrollTo(u64),
    /// New search text.
    QueryChanged(String),
    /// Replace the source items.
    ItemsLoaded(Vec<String>),
}

/// Key bindings for scrolling.
#[derive(Debug, Clone)]
pub struct VirtualListKeyBindings {
    pub up: Binding,
    pub down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub top: Binding,
    pub bottom: Binding,
}

impl Default for VirtualListKeyBindings {
    fn default() -> Self {
        Self {
            up: Binding::new(KeyCombination::new(KeyCode::Up), "↑", "up"),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "↓", "down"),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "pgup", "page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "pgdn", "page down"),
            top: Binding::new(KeyCombination::new(KeyCode::Home), "home", "top"),
            bottom: Binding::new(KeyCombination::new(KeyCode::End), "end", "bottom"),
        }
    }
}

impl KeyMap for VirtualListKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.up,
            &self.down,
            &self.page_up,
            &self.page_down,
            &self.top,
            &self.bottom,
        ]
    }
}

/// Style configuration for the list.
#[derive(Debug, Clone)]
pub struct VirtualListStyle {
    /// Base style for rows.
    pub row: Style,
    /// Style of the status line under the rows.
    pub status: Style,
    pub scrollbar: Style,
}

impl Default for VirtualListStyle {
    fn default() -> Self {
        Self {
            row: Style::default(),
            status: Style::default().fg(Color::DarkGray),
            scrollbar: Style::default(),
        }
    }
}

/// A list that only renders the rows inside its current window.
///
/// ```ignore
/// let mut list = VirtualList::new(words);
/// list.set_query("an");
/// list.set_scroll_offset(4000);
/// let rows = list.visible_items();
/// ```
pub struct VirtualList {
    items: Vec<String>,
    /// Indices into `items` that pass the query, in source order.
    filtered: Vec<usize>,
    query: String,
    scroll_offset: u64,
    range: VisibleRange,
    config: WindowConfig,
    renderer: Box<dyn RowRenderer>,
    block: Option<Block<'static>>,
    style: VirtualListStyle,
    key_bindings: VirtualListKeyBindings,
    wheel_rows: u64,
    focus: bool,
    /// Rows that fit on screen, updated by `view()`.
    visible_height: Cell<u16>,
}

impl VirtualList {
    /// Create a list over `items` with no query and the default window
    /// geometry.
    pub fn new(items: Vec<String>) -> Self {
        let mut list = Self {
            items,
            filtered: Vec::new(),
            query: String::new(),
            scroll_offset: 0,
            range: VisibleRange::default(),
            config: WindowConfig::default(),
            renderer: Box::new(PlainRow::default()),
            block: None,
            style: VirtualListStyle::default(),
            key_bindings: VirtualListKeyBindings::default(),
            wheel_rows: 3,
            focus: false,
            visible_height: Cell::new(10),
        };
        list.refilter();
        list
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self.recompute();
        self
    }

    /// Render rows with a custom renderer instead of [`PlainRow`].
    pub fn with_renderer(mut self, renderer: impl RowRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_style(mut self, style: VirtualListStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_key_bindings(mut self, bindings: VirtualListKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Rows scrolled per wheel tick. Zero disables the wheel.
    pub fn with_wheel_rows(mut self, rows: u64) -> Self {
        self.wheel_rows = rows;
        self
    }

    pub fn key_bindings(&self) -> &VirtualListKeyBindings {
        &self.key_bindings
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Replace the source items. The query and scroll offset are kept.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.refilter();
    }

    /// Change the search text. The scroll offset is not reset.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Set the offset exactly as given, even past the last row.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
        self.recompute();
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Number of items that pass the current query.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Number of source items, ignoring the query.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The items of the current window, in order.
    pub fn visible_items(&self) -> Vec<&str> {
        self.window_items(self.range.len())
    }

    fn window_items(&self, limit: usize) -> Vec<&str> {
        self.filtered[self.range.as_range()]
            .iter()
            .take(limit)
            .map(|&i| self.items[i].as_str())
            .collect()
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.items, &self.query);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.range = visible_range(self.scroll_offset, self.filtered.len(), &self.config);
        tracing::debug!(
            offset = self.scroll_offset,
            start = self.range.start,
            end = self.range.end,
            filtered = self.filtered.len(),
            "window recomputed"
        );
    }

    /// Largest offset reachable by scrolling: the last row at the top.
    fn max_offset(&self) -> u64 {
        self.config.offset_of(self.filtered.len().saturating_sub(1))
    }

    fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_offset());
        self.recompute();
    }

    fn scroll_rows(&mut self, rows: i64) {
        let delta = self.config.row_height().saturating_mul(rows.unsigned_abs());
        let offset = if rows < 0 {
            self.scroll_offset.saturating_sub(delta)
        } else {
            self.scroll_offset.saturating_add(delta)
        };
        self.scroll_to(offset);
    }

    fn page_rows(&self) -> i64 {
        i64::from(self.visible_height.get().max(1))
    }

    fn status_text(&self) -> String {
        let total = self.filtered.len();
        if total == 0 {
            "No matches".to_string()
        } else if self.range.is_empty() {
            format!("0 of {total}")
        } else {
            format!("{}-{} of {}", self.range.start + 1, self.range.end, total)
        }
    }
}

impl Component for VirtualList {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => {
                if self.key_bindings.up.matches(&key) {
                    self.scroll_rows(-1);
                } else if self.key_bindings.down.matches(&key) {
                    self.scroll_rows(1);
                } else if self.key_bindings.page_up.matches(&key) {
                    self.scroll_rows(-self.page_rows());
                } else if self.key_bindings.page_down.matches(&key) {
                    self.scroll_rows(self.page_rows());
                } else if self.key_bindings.top.matches(&key) {
                    self.scroll_to(0);
                } else if self.key_bindings.bottom.matches(&key) {
                    self.scroll_to(u64::MAX);
                }
                Command::none()
            }
            Message::MouseWheel { up } => {
                if self.wheel_rows > 0 {
                    let rows = i64::try_from(self.wheel_rows).unwrap_or(i64::MAX);
                    self.scroll_rows(if up { -rows } else { rows });
                }
                Command::none()
            }
            Message::ScrollBy(rows) => {
                self.scroll_rows(rows);
                Command::none()
            }
            Message::ScrollTo(offset) => {
                self.scroll_to(offset);
                Command::none()
            }
            Message::QueryChanged(query) => {
                self.set_query(query);
                Command::none()
            }
            Message::ItemsLoaded(items) => {
                self.set_items(items);
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let inner = match self.block {
            Some(ref block) => {
                frame.render_widget(block.clone(), area);
                block.inner(area)
            }
            None => area,
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // The status line is dropped before any rows are.
        let (rows_area, status_area) = if inner.height >= 2 {
            let [rows, status] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
            (rows, Some(status))
        } else {
            (inner, None)
        };
        self.visible_height.set(rows_area.height);

        let total = self.filtered.len();
        let overflow = total > usize::from(rows_area.height);
        let row_width = if overflow {
            rows_area.width.saturating_sub(1)
        } else {
            rows_area.width
        };

        let shown = self.window_items(usize::from(rows_area.height));
        let lines: Vec<Line<'_>> =
            render_rows(self.renderer.as_ref(), &shown, self.range.start, row_width);
        let rows = Rect {
            width: row_width,
            ..rows_area
        };
        frame.render_widget(Paragraph::new(lines).style(self.style.row), rows);

        if overflow {
            let mut state = ScrollbarState::new(total).position(self.range.start.min(total));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(self.style.scrollbar);
            frame.render_stateful_widget(scrollbar, rows_area, &mut state);
        }

        if let Some(status_area) = status_area {
            let status = Paragraph::new(Line::styled(self.status_text(), self.style.status));
            frame.render_widget(status, status_area);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
