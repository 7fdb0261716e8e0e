use futures::future::BoxFuture;
use std::future::Future;

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Model::init`](crate::Model::init).
///
/// Almost every update in a list view is a pure state change and returns
/// [`Command::none`]. The remaining cases are an immediate follow-up message
/// (a child component telling its parent the query changed), background work
/// such as re-reading a word list, and quitting.
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let cmd = Command::none();
///
/// // Load words off the event loop and hand them back as a message:
/// let cmd = Command::perform(
///     async move { source.words() },
///     Msg::WordsLoaded,
/// );
///
/// // Quit the program:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
}

/// Actions the runtime handles synchronously, without spawning a task.
pub enum Action<Msg> {
    /// Deliver a message on the next loop iteration.
    Message(Msg),
    /// Stop the event loop.
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run a future on the tokio runtime and map its output to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Run several commands. Empty input collapses to [`Command::none`] and a
    /// single command is returned as-is.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Lift the message type, used when a parent embeds a child component.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(std::sync::Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: std::sync::Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter().map(|cmd| cmd.map_with(f.clone())).collect(),
                ),
            },
        }
    }

    // --- Inspection (useful in tests) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command stops the program.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// If this command is background work, return the future producing its
    /// message. Await it inside a tokio runtime.
    pub fn into_future(self) -> Option<BoxFuture<'static, Msg>> {
        match self.inner {
            CommandInner::Future(fut) => Some(fut),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
        assert!(!cmd.is_quit());
    }

    #[test]
    fn message_round_trips_through_into_message() {
        let cmd: Command<&str> = Command::message("banana");
        assert_eq!(cmd.into_message(), Some("banana"));
    }

    #[test]
    fn quit_is_quit() {
        let cmd: Command<()> = Command::quit();
        assert!(cmd.is_quit());
    }

    #[test]
    fn batch_drops_noops_and_unwraps_single() {
        let cmd: Command<u64> = Command::batch(vec![Command::none(), Command::message(40)]);
        assert_eq!(cmd.into_message(), Some(40));

        let empty: Command<u64> = Command::batch(vec![Command::none(), Command::none()]);
        assert!(empty.is_none());
    }

    #[test]
    fn batch_keeps_multiple() {
        let cmd: Command<u64> = Command::batch(vec![Command::message(1), Command::quit()]);
        assert_eq!(cmd.into_batch().map(|c| c.len()), Some(2));
    }

    #[test]
    fn map_lifts_message() {
        let cmd: Command<u64> = Command::message(4000);
        let mapped: Command<String> = cmd.map(|offset| format!("scroll:{offset}"));
        assert_eq!(mapped.into_message().as_deref(), Some("scroll:4000"));
    }

    #[test]
    fn map_keeps_quit_and_batch_shape() {
        let quit: Command<u64> = Command::quit();
        assert!(quit.map(|n| n.to_string()).is_quit());

        let batch: Command<u64> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped = batch.map(|n| n * 40);
        let inner = mapped.into_batch().unwrap_or_default();
        let values: Vec<u64> = inner.into_iter().filter_map(Command::into_message).collect();
        assert_eq!(values, vec![40, 80]);
    }

    #[tokio::test]
    async fn perform_maps_future_output() {
        let cmd: Command<usize> = Command::perform(async { vec!["a", "b", "c"] }, |v| v.len());
        let fut = cmd.into_future().expect("perform yields a future");
        assert_eq!(fut.await, 3);
    }

    #[tokio::test]
    async fn map_lifts_future_output() {
        let cmd: Command<u64> = Command::perform(async { 12 }, |rows| rows * 40);
        let mapped = cmd.map(|offset| format!("offset:{offset}"));
        let fut = mapped.into_future().expect("map keeps the future");
        assert_eq!(fut.await, "offset:480");
    }

    #[test]
    fn into_future_rejects_other_commands() {
        let cmd: Command<u64> = Command::message(1);
        assert!(cmd.into_future().is_none());
        assert!(Command::<u64>::quit().into_future().is_none());
    }
}
