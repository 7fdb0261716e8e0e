use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source managed by the runtime.
///
/// Subscriptions are declared by [`Model::subscriptions`](crate::Model::subscriptions)
/// after every update; the runtime starts the ones it has not seen before and
/// aborts the ones that disappeared.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// An ID for a type plus a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// An ID for a singleton source.
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Wrap a stream; each item is forwarded to the program as a message.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(async move {
                    let mut stream = stream;
                    while let Some(msg) = stream.next().await {
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                });
                handle.abort_handle()
            }),
        }
    }

    /// Identity of this subscription.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = std::sync::Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                // Ends once the source task is aborted and inner_tx drops.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });
                abort
            }),
        }
    }
}

/// Tracks running subscriptions and diffs them against each new declaration.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start new subscriptions, abort removed ones, leave the rest running.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                tracing::debug!(?id, "subscription stopped");
                handle.abort();
            }
            keep
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::debug!(?id, "subscription started");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    /// Abort everything.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
