//! Shared mutable state of a registry.
//!
//! Everything in here runs under the registry mutex. No subscriber callback is
//! ever invoked from this module; callers take a [`Snapshot`] and deliver
//! after the lock is released.

use herald_core::{Message, Subscriber, SubscriberId};
use std::{
    collections::{HashMap, VecDeque},
    mem,
    sync::{Arc, Weak},
};

pub(crate) type WeakSubscriber<N, R> = Weak<dyn Subscriber<N, R>>;
pub(crate) type StrongSubscriber<N, R> = Arc<dyn Subscriber<N, R>>;

/// Live subscribers resolved at one instant.
pub(crate) struct Snapshot<N: Message, R: Message> {
    pub live: Vec<StrongSubscriber<N, R>>,
    /// Entries whose subscriber no longer exists.
    pub stale: usize,
}

/// Result of inserting a subscriber.
pub(crate) enum Insert<R> {
    AlreadyPresent,
    Inserted,
    /// Inserted into an empty set while responses were pending. The caller
    /// owns the drain and must finish it with [`State::finish_drain`].
    Backlog(VecDeque<R>),
}

/// Where a published response goes.
pub(crate) enum ResponseRoute<N: Message, R: Message> {
    /// Nobody is subscribed; appended to the pending queue.
    Buffered,
    /// A drain is in flight; a draining thread broadcasts it afterwards.
    Deferred,
    /// Broadcast now. `responses` ends with the published one and starts with
    /// any deferred responses left behind by an abandoned drain.
    Broadcast {
        responses: VecDeque<R>,
        snapshot: Snapshot<N, R>,
    },
}

/// Next step for a thread that owns a drain.
pub(crate) enum DrainStep<N: Message, R: Message> {
    Done,
    /// Responses published during the drain, to broadcast in order.
    Flush(VecDeque<R>, Snapshot<N, R>),
}

pub(crate) struct State<N: Message, R: Message> {
    subscribers: HashMap<SubscriberId, WeakSubscriber<N, R>>,
    pending: VecDeque<R>,
    deferred: VecDeque<R>,
    /// Number of registrations currently delivering a backlog.
    drains: usize,
}

impl<N: Message, R: Message> State<N, R> {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            pending: VecDeque::new(),
            deferred: VecDeque::new(),
            drains: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn insert(&mut self, id: SubscriberId, subscriber: WeakSubscriber<N, R>) -> Insert<R> {
        if self.subscribers.contains_key(&id) {
            return Insert::AlreadyPresent;
        }
        if self.subscribers.is_empty() {
            self.requeue_deferred();
        }
        self.subscribers.insert(id, subscriber);

        if self.pending.is_empty() {
            Insert::Inserted
        } else {
            self.drains += 1;
            Insert::Backlog(mem::take(&mut self.pending))
        }
    }

    pub fn remove(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Removes entries whose subscriber has been dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.subscribers.len();
        self.subscribers.retain(|_, weak| weak.strong_count() > 0);
        before - self.subscribers.len()
    }

    pub fn snapshot(&mut self, prune: bool) -> Snapshot<N, R> {
        let mut live = Vec::with_capacity(self.subscribers.len());
        let mut stale = 0;

        if prune {
            self.subscribers.retain(|_, weak| match weak.upgrade() {
                Some(subscriber) => {
                    live.push(subscriber);
                    true
                }
                None => {
                    stale += 1;
                    false
                }
            });
        } else {
            for weak in self.subscribers.values() {
                match weak.upgrade() {
                    Some(subscriber) => live.push(subscriber),
                    None => stale += 1,
                }
            }
        }

        Snapshot { live, stale }
    }

    /// Decides, in one step, whether `response` is buffered or broadcast.
    ///
    /// The emptiness test sees the set after pruning, when pruning is on.
    /// Nothing is upgraded on the buffering paths, so no subscriber can be
    /// dropped while the lock is held.
    pub fn route_response(&mut self, response: R, prune: bool) -> ResponseRoute<N, R> {
        let pruned = if prune { self.prune() } else { 0 };

        if self.subscribers.is_empty() {
            self.requeue_deferred();
            self.pending.push_back(response);
            ResponseRoute::Buffered
        } else if self.drains > 0 {
            self.deferred.push_back(response);
            ResponseRoute::Deferred
        } else {
            self.deferred.push_back(response);
            let mut snapshot = self.snapshot(prune);
            snapshot.stale += pruned;
            ResponseRoute::Broadcast {
                responses: mem::take(&mut self.deferred),
                snapshot,
            }
        }
    }

    /// Called by a draining thread once its backlog has been delivered.
    ///
    /// Only the last outstanding drain flushes the deferred responses, so they
    /// are broadcast once and in arrival order. If every subscriber left in the
    /// meantime, they move to the front of the pending queue.
    pub fn finish_drain(&mut self, prune: bool) -> DrainStep<N, R> {
        if self.drains > 1 || self.deferred.is_empty() {
            self.drains = self.drains.saturating_sub(1);
            return DrainStep::Done;
        }

        if prune {
            self.prune();
        }
        if self.subscribers.is_empty() {
            self.requeue_deferred();
            self.drains = 0;
            return DrainStep::Done;
        }

        let snapshot = self.snapshot(prune);
        DrainStep::Flush(mem::take(&mut self.deferred), snapshot)
    }

    /// Called instead of [`finish_drain`](Self::finish_drain) when a drain
    /// unwinds. Deferred responses that no drain is left to flush stay parked
    /// and go out ahead of the next response published.
    pub fn abandon_drain(&mut self) {
        self.drains = self.drains.saturating_sub(1);
        if self.drains == 0 && self.subscribers.is_empty() {
            self.requeue_deferred();
        }
    }

    /// Moves deferred responses to the front of the pending queue.
    ///
    /// Deferred responses are always older than anything appended to the
    /// pending queue after them, so the next backlog stays in arrival order.
    fn requeue_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        let mut requeued = mem::take(&mut self.deferred);
        requeued.append(&mut self.pending);
        self.pending = requeued;
    }
}
