use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`].
///
/// Components are the building blocks of the word list screen: the search
/// field and the windowed list are both components, and the application
/// [`Model`](crate::Model) decides where each one is drawn by splitting the
/// frame with a ratatui `Layout`.
///
/// A parent wraps the child's message type in one of its own variants and
/// lifts returned commands with [`Command::map`]:
///
/// ```rust,ignore
/// enum AppMsg { List(virtual_list::Message) }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::List(m) => self.list.update(m).map(AppMsg::List),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Fold a message into the component state.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations must stay inside the rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently receives keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
