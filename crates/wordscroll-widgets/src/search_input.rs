//! Single-line query field that drives the list filter.
//!
//! Every edit emits [`Message::QueryChanged`] with the full query so the
//! parent can hand it to [`VirtualList::set_query`](crate::virtual_list::VirtualList::set_query).
//! The field is always active; there is no separate "search mode".

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use wordscroll_core::command::Command;
use wordscroll_core::component::Component;

/// Messages for the search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded by the parent.
    KeyPress(KeyEvent),
    /// Pasted text, inserted at the cursor.
    Paste(String),
    /// Emitted after every edit with the new query.
    QueryChanged(String),
}

/// Style configuration for the search input.
#[derive(Debug, Clone)]
pub struct SearchInputStyle {
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

impl Default for SearchInputStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// The query field.
pub struct SearchInput {
    query: String,
    /// Cursor position in chars, `0..=query.chars().count()`.
    cursor: usize,
    placeholder: String,
    focus: bool,
    style: SearchInputStyle,
    block: Option<Block<'static>>,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchInput {
    /// An empty, focused field with a `Search...` placeholder.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            placeholder: "Search...".to_string(),
            focus: true,
            style: SearchInputStyle::default(),
            block: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_style(mut self, style: SearchInputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the query and move the cursor to its end.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn insert_str(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.query.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::QueryChanged(self.query.clone()))
    }
}

impl Component for SearchInput {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match (key.code, key.modifiers) {
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                    if self.query.is_empty() {
                        return Command::none();
                    }
                    self.query.clear();
                    self.cursor = 0;
                    self.changed()
                }
                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    let mut buf = [0u8; 4];
                    self.insert_str(c.encode_utf8(&mut buf));
                    self.changed()
                }
                (KeyCode::Backspace, _) => {
                    if self.cursor == 0 {
                        return Command::none();
                    }
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.query.remove(at);
                    self.changed()
                }
                (KeyCode::Delete, _) => {
                    if self.cursor >= self.char_len() {
                        return Command::none();
                    }
                    let at = self.byte_offset(self.cursor);
                    self.query.remove(at);
                    self.changed()
                }
                (KeyCode::Left, _) => {
                    self.cursor = self.cursor.saturating_sub(1);
                    Command::none()
                }
                (KeyCode::Right, _) => {
                    self.cursor = (self.cursor + 1).min(self.char_len());
                    Command::none()
                }
                (KeyCode::Home, KeyModifiers::CONTROL) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                    self.cursor = 0;
                    Command::none()
                }
                (KeyCode::End, KeyModifiers::CONTROL) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                    self.cursor = self.char_len();
                    Command::none()
                }
                _ => Command::none(),
            },
            Message::Paste(text) if self.focus => {
                let clean: String = text.chars().filter(|c| !c.is_control()).collect();
                if clean.is_empty() {
                    return Command::none();
                }
                self.insert_str(&clean);
                self.changed()
            }
            // Notifications for the parent; nothing to do here.
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

        let cursor_style = if self.focus {
            self.style.cursor
        } else {
            self.style.text
        };

        let mut spans = Vec::new();
        if self.query.is_empty() {
            spans.push(Span::styled(" ", cursor_style));
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else {
            let at = self.byte_offset(self.cursor);
            let before = &self.query[..at];
            if !before.is_empty() {
                spans.push(Span::styled(before, self.style.text));
            }
            if self.cursor < self.char_len() {
                let next = self.byte_offset(self.cursor + 1);
                spans.push(Span::styled(&self.query[at..next], cursor_style));
                let after = &self.query[next..];
                if !after.is_empty() {
                    spans.push(Span::styled(after, self.style.text));
                }
            } else {
                spans.push(Span::styled(" ", cursor_style));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
