//! Channel adapter for async consumers.
//!
//! [`ChannelSubscriber`] turns the registry's synchronous callbacks into a
//! [`Stream`](futures::Stream) of [`SubscriberEvent`]s. The callback only
//! pushes into an unbounded channel, so the producer thread is never blocked
//! by the consumer; the consumer reads at its own pace, e.g. from a bridge
//! task that forwards events to a scripting runtime.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use herald_core::{BoxError, DeliveryError, Message, Subscriber};
use std::sync::Arc;

/// An event forwarded by a [`ChannelSubscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberEvent<N, R> {
    /// A delivered notification.
    Received(N),
    /// A user interaction.
    Response(R),
    /// Delivered notifications were dismissed.
    Dropped,
}

/// Receiving half handed out by [`ChannelSubscriber::new`].
pub type EventStream<N, R> = UnboundedReceiver<SubscriberEvent<N, R>>;

/// A subscriber that forwards every event into a channel.
///
/// Once the [`EventStream`] is dropped, callbacks fail with
/// [`DeliveryError::Closed`]; the registry logs this and carries on. Drop the
/// subscriber (or unregister it) to stop deliveries altogether.
///
/// # Example
///
/// ```rust,ignore
/// let (bridge, mut events) = ChannelSubscriber::new();
/// let _subscription = registry.subscribe(&bridge);
///
/// while let Some(event) = events.next().await {
///     forward_to_script(event);
/// }
/// ```
pub struct ChannelSubscriber<N, R> {
    name: &'static str,
    sender: UnboundedSender<SubscriberEvent<N, R>>,
}

impl<N: Message + Clone, R: Message + Clone> ChannelSubscriber<N, R> {
    /// Creates a subscriber and the stream it feeds.
    pub fn new() -> (Arc<Self>, EventStream<N, R>) {
        Self::named("channel")
    }

    /// Same as [`new`](Self::new) with a custom log name.
    pub fn named(name: &'static str) -> (Arc<Self>, EventStream<N, R>) {
        let (sender, receiver) = unbounded();
        (Arc::new(Self { name, sender }), receiver)
    }

    /// Returns `true` once the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn forward(&self, event: SubscriberEvent<N, R>) -> Result<(), BoxError> {
        self.sender
            .unbounded_send(event)
            .map_err(|_| DeliveryError::Closed.into())
    }
}

impl<N, R> Subscriber<N, R> for ChannelSubscriber<N, R>
where
    N: Message + Clone,
    R: Message + Clone,
{
    fn on_received(&self, notification: &N) -> Result<(), BoxError> {
        self.forward(SubscriberEvent::Received(notification.clone()))
    }

    fn on_response_received(&self, response: &R) -> Result<(), BoxError> {
        self.forward(SubscriberEvent::Response(response.clone()))
    }

    fn on_dropped(&self) -> Result<(), BoxError> {
        self.forward(SubscriberEvent::Dropped)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
