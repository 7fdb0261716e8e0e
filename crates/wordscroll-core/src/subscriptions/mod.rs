//! Built-in subscription sources.
//!
//! Only terminal input is needed by the list view: keys edit the query or
//! scroll, the mouse wheel scrolls, and resizes trigger a re-render.

mod terminal;

pub use terminal::*;
