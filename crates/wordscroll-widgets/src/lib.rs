//! Widgets for browsing a large word list in the terminal.
//!
//! Every component here implements [`wordscroll_core::Component`], so it can
//! be embedded in any [`wordscroll_core::Model`] and placed with ordinary
//! [`ratatui`] layouts.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`window`] | Pure filter-then-window computation |
//! | [`virtual_list`] | List component that renders only its window |
//! | [`search_input`] | Query field feeding the list filter |
//! | [`row`] | Row renderers and the per-row failure boundary |
//! | [`key`] | Key bindings and help lines |
//! | [`runeutil`] | Width-aware sanitising and truncation |
//! | [`chrome`] | Shared bordered blocks |

pub mod chrome;
pub mod key;
pub mod row;
pub mod runeutil;
pub mod search_input;
pub mod virtual_list;
pub mod window;

pub use row::{PlainRow, RowError, RowRenderer};
pub use search_input::SearchInput;
pub use virtual_list::VirtualList;
pub use window::{compute_window, filter_items, matches, visible_range, VisibleRange, WindowConfig};
