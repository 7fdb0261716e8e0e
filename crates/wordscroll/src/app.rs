//! The dictionary browser: a header, a search field and the windowed list.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use wordscroll_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use wordscroll_widgets::chrome::focus_block;
use wordscroll_widgets::key::{help_line, Binding, KeyCombination, KeyMap};
use wordscroll_widgets::window::WindowConfig;
use wordscroll_widgets::{search_input, virtual_list, SearchInput, VirtualList};

use crate::dictionary::{BuiltinDictionary, DictionarySource};

const HEADER: &str = "Render Virtualized List";

/// Startup parameters for [`DictionaryApp`].
pub struct DictionaryFlags {
    pub source: Arc<dyn DictionarySource>,
    pub config: WindowConfig,
}

impl DictionaryFlags {
    pub fn new(source: impl DictionarySource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            config: WindowConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for DictionaryFlags {
    fn default() -> Self {
        Self::new(BuiltinDictionary)
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Search(search_input::Message),
    List(virtual_list::Message),
    /// Query the source again in the background.
    Reload,
    Loaded(Vec<String>),
    LoadFailed(String),
    /// The terminal changed size; the next frame lays out again.
    Resize(u16, u16),
}

/// Application-level bindings, shown after the list's in the help line.
#[derive(Debug, Clone)]
pub struct AppKeyBindings {
    pub reload: Binding,
    pub quit: Binding,
}

impl Default for AppKeyBindings {
    fn default() -> Self {
        Self {
            reload: Binding::new(KeyCombination::ctrl(KeyCode::Char('r')), "^r", "reload"),
            quit: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Esc),
                    KeyCombination::ctrl(KeyCode::Char('c')),
                ],
                "esc",
                "quit",
            ),
        }
    }
}

impl KeyMap for AppKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.reload, &self.quit]
    }
}

pub struct DictionaryApp {
    source: Arc<dyn DictionarySource>,
    search: SearchInput,
    list: VirtualList,
    keys: AppKeyBindings,
    loading: bool,
    notice: Option<String>,
}

impl DictionaryApp {
    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    pub fn list(&self) -> &VirtualList {
        &self.list
    }

    /// Whether a reload is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    fn is_list_key(&self, key: &KeyEvent) -> bool {
        self.list
            .key_bindings()
            .short_help()
            .iter()
            .any(|binding| binding.matches(key))
    }

    fn footer(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        if let Some(ref notice) = self.notice {
            return notice.clone();
        }
        let mut bindings = self.list.key_bindings().short_help();
        bindings.extend(self.keys.short_help());
        help_line(&bindings)
    }
}

impl Model for DictionaryApp {
    type Message = Msg;
    type Flags = DictionaryFlags;

    fn init(flags: DictionaryFlags) -> (Self, Command<Msg>) {
        let words = flags.source.words();
        tracing::info!(count = words.len(), "dictionary loaded");

        let mut list = VirtualList::new(words).with_config(flags.config);
        list.focus();

        let app = Self {
            source: flags.source,
            search: SearchInput::new(),
            list,
            keys: AppKeyBindings::default(),
            loading: false,
            notice: None,
        };
        (app, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => {
                if self.keys.quit.matches(&key) {
                    Command::quit()
                } else if self.keys.reload.matches(&key) {
                    self.update(Msg::Reload)
                } else if self.is_list_key(&key) {
                    self.update(Msg::List(virtual_list::Message::KeyPress(key)))
                } else {
                    self.update(Msg::Search(search_input::Message::KeyPress(key)))
                }
            }
            Msg::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.update(Msg::List(virtual_list::Message::MouseWheel { up: true }))
                }
                MouseEventKind::ScrollDown => {
                    self.update(Msg::List(virtual_list::Message::MouseWheel { up: false }))
                }
                _ => Command::none(),
            },
            Msg::Paste(text) => self.update(Msg::Search(search_input::Message::Paste(text))),
            Msg::Search(search_input::Message::QueryChanged(query)) => {
                tracing::debug!(%query, "query changed");
                self.notice = None;
                self.list
                    .update(virtual_list::Message::QueryChanged(query))
                    .map(Msg::List)
            }
            Msg::Search(msg) => self.search.update(msg).map(Msg::Search),
            Msg::List(msg) => self.list.update(msg).map(Msg::List),
            Msg::Reload => {
                if self.loading {
                    return Command::none();
                }
                self.loading = true;
                let source = Arc::clone(&self.source);
                Command::perform(
                    async move { tokio::task::spawn_blocking(move || source.words()).await },
                    |result| match result {
                        Ok(words) => Msg::Loaded(words),
                        Err(err) => Msg::LoadFailed(err.to_string()),
                    },
                )
            }
            Msg::Loaded(words) => {
                tracing::info!(count = words.len(), "dictionary reloaded");
                self.loading = false;
                self.notice = None;
                self.update(Msg::List(virtual_list::Message::ItemsLoaded(words)))
            }
            Msg::LoadFailed(reason) => {
                tracing::warn!(%reason, "dictionary reload failed");
                self.loading = false;
                self.notice = Some(format!("Reload failed: {reason}"));
                Command::none()
            }
            Msg::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [header, search, list, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::styled(
                HEADER,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            header,
        );
        let search = framed(frame, search, "Search", self.search.focused());
        self.search.view(frame, search);
        let list = framed(frame, list, "Words", self.list.focused());
        self.list.view(frame, list);
        frame.render_widget(
            Paragraph::new(Line::styled(
                self.footer(),
                Style::default().fg(Color::DarkGray),
            )),
            footer,
        );
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            TerminalEvent::Resize(width, height) => Some(Msg::Resize(width, height)),
            _ => None,
        })]
    }
}

/// Draw a titled border for a child and return the area left inside it.
fn framed(frame: &mut Frame, area: Rect, title: &str, focused: bool) -> Rect {
    let block = focus_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
