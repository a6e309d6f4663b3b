//! The event fan-out registry.
//!
//! A [`Registry`] receives three kinds of events from a single producer and
//! hands them to every live subscriber:
//!
//! - notifications ([`Registry::publish_received`]) and drop signals
//!   ([`Registry::publish_dropped`]) are broadcast immediately and never kept;
//! - responses ([`Registry::publish_response`]) are broadcast immediately when
//!   someone is subscribed, and otherwise queued until the next subscriber
//!   registers, which then receives the whole queue in arrival order.
//!
//! Subscribers are held through [`Weak`] references. Dropping the last `Arc`
//! to a subscriber is enough to stop deliveries to it; explicit
//! unregistration is optional.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Registry::new();
//! let bridge = Arc::new(Bridge::default());
//!
//! registry.publish_response(response);   // nobody listening: buffered
//! registry.register(&bridge);            // bridge receives `response` now
//! registry.publish_received(&notification);
//! ```

mod config;
mod deliver;
mod state;

pub use config::{RegistryBuilder, RegistryConfig};

use crate::handle::{Publisher, Subscription};
use deliver::{Event, broadcast, deliver};
use herald_core::{
    Message, Notification, NotificationResponse, PublishReport, RegistryError, Subscriber,
    SubscriberId,
};
use state::{DrainStep, Insert, ResponseRoute, Snapshot, State, StrongSubscriber, WeakSubscriber};
use std::{
    collections::VecDeque,
    fmt, mem,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

/// Shared registry state, referenced by every handle.
pub(crate) struct Inner<N: Message, R: Message> {
    config: RegistryConfig,
    state: Mutex<State<N, R>>,
}

impl<N: Message, R: Message> Inner<N, R> {
    fn state(&self) -> MutexGuard<'_, State<N, R>> {
        // Callbacks never run under this lock, so poisoning can only come from
        // a bug inside the registry itself; the state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remove(&self, id: SubscriberId) -> bool {
        let removed = self.state().remove(id);
        if removed {
            log!(debug, registry = self.config.name, subscriber = %id, "unregistered");
        }
        removed
    }
}

/// An in-process event fan-out registry.
///
/// `Registry` is a cheap handle; clones share the same subscribers and
/// pending queue. Build one at startup and pass clones (or a [`Publisher`])
/// to the producer and to whatever owns the subscribers.
pub struct Registry<N: Message = Notification, R: Message = NotificationResponse> {
    inner: Arc<Inner<N, R>>,
}

impl<N: Message, R: Message> Registry<N, R> {
    /// Creates a registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder<N, R> {
        RegistryBuilder::new()
    }

    /// Creates a registry from a resolved configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        log!(
            debug,
            registry = config.name,
            prune_stale = config.prune_stale,
            catch_panics = config.catch_panics,
            "registry created"
        );
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(State::new()),
            }),
        }
    }

    /// Settings this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Label used in log lines.
    pub fn name(&self) -> &'static str {
        self.inner.config.name
    }

    // ------------------------------------------------------------------
    // Subscription lifecycle
    // ------------------------------------------------------------------

    /// Registers `subscriber` without taking ownership of it.
    ///
    /// Returns `false` if the same subscriber (same `Arc` allocation) is
    /// already registered, in which case nothing happens. On first
    /// registration, any responses buffered while nobody was subscribed are
    /// delivered to this subscriber, oldest first, before this call returns.
    pub fn register<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber<N, R>,
    {
        let weak: WeakSubscriber<N, R> = Arc::downgrade(subscriber) as Weak<dyn Subscriber<N, R>>;
        let strong: StrongSubscriber<N, R> = subscriber.clone();
        self.insert(SubscriberId::of(subscriber), weak, strong)
    }

    /// Registers a subscriber the caller only holds weakly.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SubscriberGone`] if `subscriber` no longer
    /// resolves.
    pub fn register_weak(&self, subscriber: WeakSubscriber<N, R>) -> Result<bool, RegistryError> {
        let Some(strong) = subscriber.upgrade() else {
            log!(warn, registry = self.name(), "rejected registration of a dead subscriber");
            return Err(RegistryError::SubscriberGone);
        };
        let id = SubscriberId::of_weak(&subscriber);
        Ok(self.insert(id, subscriber, strong))
    }

    fn insert(
        &self,
        id: SubscriberId,
        weak: WeakSubscriber<N, R>,
        strong: StrongSubscriber<N, R>,
    ) -> bool {
        let outcome = self.inner.state().insert(id, weak);
        match outcome {
            Insert::AlreadyPresent => {
                log!(trace, registry = self.name(), subscriber = %id, "already registered");
                false
            }
            Insert::Inserted => {
                log!(debug, registry = self.name(), subscriber = %id, name = strong.name(), "registered");
                true
            }
            Insert::Backlog(backlog) => {
                log!(
                    debug,
                    registry = self.name(),
                    subscriber = %id,
                    name = strong.name(),
                    backlog = backlog.len(),
                    "registered, draining pending responses"
                );
                self.drain(strong.as_ref(), backlog);
                true
            }
        }
    }

    /// Delivers a backlog to the subscriber that claimed it, then broadcasts
    /// whatever was published while the backlog was being delivered.
    fn drain(&self, subscriber: &dyn Subscriber<N, R>, backlog: VecDeque<R>) {
        let config = self.config();
        let guard = DrainGuard { inner: &*self.inner };
        let mut report = PublishReport::default();

        for response in &backlog {
            match deliver(subscriber, Event::Response(response), config.catch_panics) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    log!(warn, registry = config.name, error = %err, "delivery of buffered response failed");
                }
            }
        }
        drop(backlog);

        loop {
            let step = self.inner.state().finish_drain(config.prune_stale);
            match step {
                DrainStep::Done => break,
                DrainStep::Flush(batch, snapshot) => {
                    log!(debug, registry = config.name, count = batch.len(), "flushing responses published during drain");
                    report.merge(self.broadcast_responses(&batch, &snapshot));
                }
            }
        }
        mem::forget(guard);

        log!(
            debug,
            registry = config.name,
            delivered = report.delivered,
            failed = report.failed,
            "drain finished"
        );
    }

    fn broadcast_responses(&self, responses: &VecDeque<R>, snapshot: &Snapshot<N, R>) -> PublishReport {
        let mut report = PublishReport::default();
        for response in responses {
            report.merge(broadcast(self.config(), snapshot, Event::Response(response)));
        }
        report
    }

    /// Removes `subscriber`. Returns `false` if it was not registered.
    pub fn unregister<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: ?Sized,
    {
        self.unregister_id(SubscriberId::of(subscriber))
    }

    /// Removes the subscriber with the given identity, if present.
    pub fn unregister_id(&self, id: SubscriberId) -> bool {
        self.inner.remove(id)
    }

    /// Registers `subscriber` and returns a guard that unregisters it on drop.
    ///
    /// If the subscriber was already registered the guard still takes over
    /// its unregistration.
    pub fn subscribe<S>(&self, subscriber: &Arc<S>) -> Subscription<N, R>
    where
        S: Subscriber<N, R>,
    {
        self.register(subscriber);
        Subscription::new(Arc::downgrade(&self.inner), SubscriberId::of(subscriber))
    }

    /// Returns a producer-side handle.
    pub fn publisher(&self) -> Publisher<N, R> {
        Publisher::new(self.clone())
    }

    // ------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------

    /// Delivers `notification` to every live subscriber. Never buffered.
    pub fn publish_received(&self, notification: &N) -> PublishReport {
        let snapshot = self.inner.state().snapshot(self.config().prune_stale);
        broadcast(self.config(), &snapshot, Event::Received(notification))
    }

    /// Delivers `response` to every live subscriber, or buffers it if there
    /// are none.
    ///
    /// Buffered responses are handed to the next subscriber that registers.
    /// The queue is unbounded. While a new subscriber is still receiving the
    /// queue, `response` is parked and broadcast right after it; the report
    /// then has [`deferred`](PublishReport::deferred) set.
    pub fn publish_response(&self, response: R) -> PublishReport {
        let route = self
            .inner
            .state()
            .route_response(response, self.config().prune_stale);

        match route {
            ResponseRoute::Buffered => {
                log!(debug, registry = self.name(), "no subscribers, response buffered");
                PublishReport::buffered()
            }
            ResponseRoute::Deferred => {
                log!(debug, registry = self.name(), "drain in progress, response deferred");
                PublishReport::deferred()
            }
            ResponseRoute::Broadcast { responses, snapshot } => {
                self.broadcast_responses(&responses, &snapshot)
            }
        }
    }

    /// Tells every live subscriber that notifications were dropped. Never
    /// buffered, even when nobody is subscribed.
    pub fn publish_dropped(&self) -> PublishReport {
        let snapshot = self.inner.state().snapshot(self.config().prune_stale);
        broadcast(self.config(), &snapshot, Event::Dropped)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of entries, including ones whose subscriber has been dropped
    /// but not yet pruned.
    pub fn len(&self) -> usize {
        self.inner.state().len()
    }

    /// Returns `true` if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of responses waiting for a first subscriber.
    pub fn pending_len(&self) -> usize {
        self.inner.state().pending_len()
    }

    /// Returns `true` if `subscriber` is registered.
    pub fn contains<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: ?Sized,
    {
        self.inner.state().contains(SubscriberId::of(subscriber))
    }

    /// Removes entries whose subscriber has been dropped. Returns how many
    /// were removed.
    pub fn prune(&self) -> usize {
        let removed = self.inner.state().prune();
        if removed > 0 {
            log!(debug, registry = self.name(), removed, "pruned stale subscribers");
        }
        removed
    }
}

/// Releases a drain whose delivery unwound, so later responses are not
/// parked forever. Forgotten on the normal path.
struct DrainGuard<'a, N: Message, R: Message> {
    inner: &'a Inner<N, R>,
}

impl<N: Message, R: Message> Drop for DrainGuard<'_, N, R> {
    fn drop(&mut self) {
        log!(warn, registry = self.inner.config.name, "drain unwound, releasing it");
        self.inner.state().abandon_drain();
    }
}

impl<N: Message, R: Message> Clone for Registry<N, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Message, R: Message> Default for Registry<N, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Message, R: Message> fmt::Debug for Registry<N, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state();
        f.debug_struct("Registry")
            .field("name", &self.inner.config.name)
            .field("subscribers", &state.len())
            .field("pending", &state.pending_len())
            .finish()
    }
}
