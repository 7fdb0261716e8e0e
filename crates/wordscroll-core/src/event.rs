use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};

/// Terminal input delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
///
/// Payloads are crossterm's own types so key codes, modifiers and mouse
/// buttons can be matched directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press or repeat. Releases are filtered out.
    Key(KeyEvent),
    /// A mouse event (wheel scrolling, clicks).
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
    /// Terminal focus changed; `true` when gained.
    Focus(bool),
}

impl TerminalEvent {
    /// Convert a raw crossterm event, dropping key releases so that terminals
    /// with the kitty keyboard protocol don't type every character twice.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => Some(TerminalEvent::Key(key)),
            Event::Mouse(mouse) => Some(TerminalEvent::Mouse(mouse)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            Event::Paste(text) => Some(TerminalEvent::Paste(text)),
            Event::FocusGained => Some(TerminalEvent::Focus(true)),
            Event::FocusLost => Some(TerminalEvent::Focus(false)),
        }
    }
}
