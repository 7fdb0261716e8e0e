//! **wordscroll** -- a filterable, virtualized word list for the terminal.
//!
//! Only the rows inside the current window are ever rendered: the word list
//! is filtered by the search text, the scroll offset picks a window over the
//! filtered words, and that window is drawn.
//!
//! * Everything from [`wordscroll_core`] is available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`], ...).
//! * [`widgets`] re-exports [`wordscroll_widgets`] (the list, the search
//!   field and the pure window computation).
//! * [`dictionary`] holds the word sources and [`app`] the ready-made
//!   browser model.
//!
//! ```ignore
//! use wordscroll::app::{DictionaryApp, DictionaryFlags};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wordscroll::ProgramError> {
//!     wordscroll::run::<DictionaryApp>(DictionaryFlags::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod dictionary;

pub use wordscroll_core::*;
pub mod widgets {
    pub use wordscroll_widgets::*;
}

pub use app::{DictionaryApp, DictionaryFlags};
pub use dictionary::{
    BuiltinDictionary, DictionaryError, DictionarySource, FileDictionary, VecDictionary,
};

pub use crossterm;
pub use ratatui;
pub use tokio;
