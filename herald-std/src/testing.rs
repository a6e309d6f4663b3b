//! Testing utilities for Herald.
//!
//! Subscribers that make registry behaviour easy to assert on.
//!
//! - [`RecordingSubscriber`]: records every event it receives, in order
//! - [`FailingSubscriber`]: fails every callback, by error or by panic

use herald_core::{BoxError, Message, Subscriber};
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Subscriber
// ============================================================================

/// One event as seen by a [`RecordingSubscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded<N, R> {
    /// `on_received` with a clone of the notification.
    Received(N),
    /// `on_response_received` with a clone of the response.
    Response(R),
    /// `on_dropped`.
    Dropped,
}

/// A subscriber that records all events it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Arc::new(RecordingSubscriber::new());
/// registry.register(&recorder);
///
/// registry.publish_received(&notification);
///
/// assert_eq!(recorder.events(), vec![Recorded::Received(notification)]);
/// ```
pub struct RecordingSubscriber<N, R> {
    name: &'static str,
    events: Mutex<Vec<Recorded<N, R>>>,
}

impl<N: Clone, R: Clone> RecordingSubscriber<N, R> {
    /// Create a new recording subscriber.
    pub fn new() -> Self {
        Self::named("recording")
    }

    /// Create a recording subscriber with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            events: Mutex::new(Vec::new()),
        }
    }

    fn log(&self) -> MutexGuard<'_, Vec<Recorded<N, R>>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Recorded<N, R>> {
        self.log().clone()
    }

    /// Recorded notifications, in order.
    pub fn received(&self) -> Vec<N> {
        self.log()
            .iter()
            .filter_map(|event| match event {
                Recorded::Received(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    /// Recorded responses, in order.
    pub fn responses(&self) -> Vec<R> {
        self.log()
            .iter()
            .filter_map(|event| match event {
                Recorded::Response(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of drop signals received.
    pub fn dropped_count(&self) -> usize {
        self.log()
            .iter()
            .filter(|event| matches!(event, Recorded::Dropped))
            .count()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.log().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.log().clear();
    }
}

impl<N: Clone, R: Clone> Default for RecordingSubscriber<N, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, R> Subscriber<N, R> for RecordingSubscriber<N, R>
where
    N: Message + Clone,
    R: Message + Clone,
{
    fn on_received(&self, notification: &N) -> Result<(), BoxError> {
        self.log().push(Recorded::Received(notification.clone()));
        Ok(())
    }

    fn on_response_received(&self, response: &R) -> Result<(), BoxError> {
        self.log().push(Recorded::Response(response.clone()));
        Ok(())
    }

    fn on_dropped(&self) -> Result<(), BoxError> {
        self.log().push(Recorded::Dropped);
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ============================================================================
// Failing Subscriber
// ============================================================================

/// How a [`FailingSubscriber`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Return an error from the callback.
    Error,
    /// Panic inside the callback.
    Panic,
}

/// A subscriber whose every callback fails.
///
/// Counts attempts so tests can check it was still called.
pub struct FailingSubscriber {
    failure: Failure,
    attempts: AtomicUsize,
}

impl FailingSubscriber {
    /// Creates a subscriber that fails in the given way.
    pub fn new(failure: Failure) -> Self {
        Self {
            failure,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of callbacks invoked so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail(&self, what: &str) -> Result<(), BoxError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Failure::Error => Err(format!("{what} rejected").into()),
            Failure::Panic => panic!("{what} handler panicked"),
        }
    }
}

impl<N: Message, R: Message> Subscriber<N, R> for FailingSubscriber {
    fn on_received(&self, _notification: &N) -> Result<(), BoxError> {
        self.fail("notification")
    }

    fn on_response_received(&self, _response: &R) -> Result<(), BoxError> {
        self.fail("response")
    }

    fn on_dropped(&self) -> Result<(), BoxError> {
        self.fail("drop signal")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
