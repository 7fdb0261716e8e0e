//! Bordered block helper shared by the search field and the list.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// A rounded, bordered block whose border is cyan when `focused` and dark
/// gray otherwise.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(color))
}
