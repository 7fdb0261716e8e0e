use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Marker type giving the terminal subscription a stable identity.
pub struct TerminalEvents;

/// Subscribe to terminal input, mapping each event through `map`.
///
/// Return `None` from `map` to ignore an event. The crossterm
/// [`EventStream`] is created inside the spawned task rather than here,
/// because `subscriptions()` runs after every update and building a second
/// stream would compete with the live one for crossterm's global reader.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let mut events = EventStream::new();
                while let Some(result) = events.next().await {
                    let event = match result {
                        Ok(event) => event,
                        Err(err) => {
                            tracing::warn!(%err, "terminal event read failed");
                            continue;
                        }
                    };
                    let Some(msg) = TerminalEvent::from_crossterm(event).and_then(|e| map(e))
                    else {
                        continue;
                    };
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}
