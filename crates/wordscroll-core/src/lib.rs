//! Runtime for **wordscroll**, a filterable, virtualized word list for the
//! terminal.
//!
//! The design follows the [Elm Architecture]: state lives in a [`Model`],
//! every change arrives as a message, and side effects are described by
//! [`Command`]s and [`Subscription`]s that the [`Program`] executes.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect returned from `init` / `update` |
//! | [`Subscription`] | Long-lived event source (terminal input) |
//! | [`Program`] | Wires a [`Model`] to the terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit tests |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use logging::init_file_logging;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{Subscription, SubscriptionId};
pub use subscriptions::terminal_events;

/// Run a model with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
