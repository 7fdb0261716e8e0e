use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) builds the initial state from
///    [`Flags`](Model::Flags) (for the word list: the dictionary source and
///    window configuration).
/// 2. [`view`](Model::view) renders the current state into a
///    [`ratatui::Frame`].
/// 3. Terminal events arrive as messages through [`Subscription`]s.
/// 4. [`update`](Model::update) folds each message into the state and may
///    return a [`Command`].
/// 5. Steps 2-4 repeat until a command asks the program to quit.
///
/// All state is owned by the model for the lifetime of the program; nothing
/// persists after it exits.
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// Every event that can change the state.
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`].
    type Flags: Send + 'static;

    /// Create the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Fold a message into the state and return follow-up work.
    ///
    /// After `update` returns the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must not mutate observable state.
    fn view(&self, frame: &mut Frame);

    /// Declare the event sources that should be active for the current state.
    ///
    /// The runtime diffs the returned set against the running one by
    /// [`SubscriptionId`](crate::SubscriptionId).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
