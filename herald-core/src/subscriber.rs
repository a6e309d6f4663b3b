//! # Subscriber
//!
//! A subscriber is the downstream end of the fan-out. It receives three kinds
//! of events from the registry:
//!
//! - a delivered notification ([`Subscriber::on_received`]),
//! - a user's response to an earlier notification
//!   ([`Subscriber::on_response_received`]),
//! - a "notifications were dropped" signal ([`Subscriber::on_dropped`]).
//!
//! Callbacks run synchronously on the publishing thread, so they should return
//! quickly. The registry never owns a subscriber: it only keeps a
//! [`Weak`](std::sync::Weak) reference, and the subscriber's owner decides
//! when it goes away.

use crate::{
    error::BoxError,
    message::Message,
    notification::{Notification, NotificationResponse},
};
use std::sync::{Arc, Weak};

/// A listener for events broadcast by the registry.
///
/// The type parameters default to the bundled notification model.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Subscriber` for `{N}` / `{R}`",
    label = "missing `Subscriber` implementation",
    note = "Subscribers must implement `on_received` and `on_response_received`."
)]
pub trait Subscriber<N: Message = Notification, R: Message = NotificationResponse>:
    Send + Sync + 'static
{
    /// Called when a notification is delivered.
    fn on_received(&self, notification: &N) -> Result<(), BoxError>;

    /// Called when the user responded to a notification.
    fn on_response_received(&self, response: &R) -> Result<(), BoxError>;

    /// Called when the producer dropped pending notifications.
    fn on_dropped(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Label used in logs and delivery errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Identity of a registered subscriber.
///
/// Two handles have the same id exactly when they point at the same `Arc`
/// allocation. A registry entry keeps a `Weak` to the allocation, which keeps
/// the address reserved, so an id cannot be reused by another subscriber
/// while the entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Identity of the subscriber behind `subscriber`.
    pub fn of<T: ?Sized>(subscriber: &Arc<T>) -> Self {
        Self(Arc::as_ptr(subscriber).cast::<()>() as usize)
    }

    /// Identity of the subscriber behind a weak reference.
    ///
    /// Meaningful only while the allocation is still reserved, i.e. while
    /// some `Arc` or `Weak` to it is alive.
    pub fn of_weak<T: ?Sized>(subscriber: &Weak<T>) -> Self {
        Self(Weak::as_ptr(subscriber).cast::<()>() as usize)
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
