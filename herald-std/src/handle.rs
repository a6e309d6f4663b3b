//! Narrow handles onto a registry.
//!
//! - [`Publisher`] is what the producer gets: it can publish and nothing else.
//! - [`Subscription`] is what a subscriber's owner keeps: dropping it
//!   unregisters the subscriber.

use crate::registry::{Inner, Registry};
use herald_core::{Message, Notification, NotificationResponse, PublishReport, SubscriberId};
use std::{fmt, sync::Weak};

/// Producer-side handle exposing only the publish operations.
pub struct Publisher<N: Message = Notification, R: Message = NotificationResponse> {
    registry: Registry<N, R>,
}

impl<N: Message, R: Message> Publisher<N, R> {
    pub(crate) fn new(registry: Registry<N, R>) -> Self {
        Self { registry }
    }

    /// See [`Registry::publish_received`].
    pub fn received(&self, notification: &N) -> PublishReport {
        self.registry.publish_received(notification)
    }

    /// See [`Registry::publish_response`].
    pub fn response(&self, response: R) -> PublishReport {
        self.registry.publish_response(response)
    }

    /// See [`Registry::publish_dropped`].
    pub fn dropped(&self) -> PublishReport {
        self.registry.publish_dropped()
    }
}

impl<N: Message, R: Message> Clone for Publisher<N, R> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<N: Message, R: Message> fmt::Debug for Publisher<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("registry", &self.registry.name())
            .finish()
    }
}

/// Unregisters a subscriber when dropped.
///
/// Holds the registry weakly: a subscription never keeps a registry alive,
/// and dropping it after the registry is gone does nothing.
#[must_use = "dropping a Subscription unregisters the subscriber immediately"]
pub struct Subscription<N: Message = Notification, R: Message = NotificationResponse> {
    registry: Option<Weak<Inner<N, R>>>,
    id: SubscriberId,
}

impl<N: Message, R: Message> Subscription<N, R> {
    pub(crate) fn new(registry: Weak<Inner<N, R>>, id: SubscriberId) -> Self {
        Self {
            registry: Some(registry),
            id,
        }
    }

    /// Identity of the guarded subscriber.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Unregisters now. Returns `false` if the subscriber was no longer
    /// registered or the registry is gone.
    pub fn cancel(mut self) -> bool {
        self.release()
    }

    /// Forgets the guard and leaves the subscriber registered.
    pub fn detach(mut self) {
        self.registry = None;
    }

    fn release(&mut self) -> bool {
        self.registry
            .take()
            .and_then(|registry| registry.upgrade())
            .is_some_and(|inner| inner.remove(self.id))
    }
}

impl<N: Message, R: Message> Drop for Subscription<N, R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<N: Message, R: Message> fmt::Debug for Subscription<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.registry.is_some())
            .finish()
    }
}
