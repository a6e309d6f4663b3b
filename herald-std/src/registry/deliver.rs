//! Isolated delivery to individual subscribers.
//!
//! Each callback runs inside `catch_unwind` unless the registry was built
//! with `catch_panics(false)`, so an error or a panic in one subscriber is
//! logged and counted but never reaches the producer or the remaining
//! subscribers of the same broadcast.

use super::{RegistryConfig, state::Snapshot};
use herald_core::{DeliveryError, Message, PublishReport, Subscriber};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

/// One event, borrowed for the duration of a broadcast.
pub(crate) enum Event<'a, N, R> {
    Received(&'a N),
    Response(&'a R),
    Dropped,
}

impl<N, R> Clone for Event<'_, N, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, R> Copy for Event<'_, N, R> {}

impl<N, R> Event<'_, N, R> {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Received(_) => "received",
            Event::Response(_) => "response",
            Event::Dropped => "dropped",
        }
    }
}

/// Invokes the callback matching `event` on one subscriber.
///
/// With `catch_panics` off a panicking callback unwinds into the caller.
pub(crate) fn deliver<N: Message, R: Message>(
    subscriber: &dyn Subscriber<N, R>,
    event: Event<'_, N, R>,
    catch_panics: bool,
) -> Result<(), DeliveryError> {
    let invoke = || match event {
        Event::Received(notification) => subscriber.on_received(notification),
        Event::Response(response) => subscriber.on_response_received(response),
        Event::Dropped => subscriber.on_dropped(),
    };

    if !catch_panics {
        return invoke().map_err(|source| DeliveryError::callback(subscriber.name(), source));
    }

    match panic::catch_unwind(AssertUnwindSafe(invoke)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(DeliveryError::callback(subscriber.name(), source)),
        Err(payload) => Err(DeliveryError::Panicked {
            subscriber: subscriber.name(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Delivers `event` to every subscriber of `snapshot`.
pub(crate) fn broadcast<N: Message, R: Message>(
    config: &RegistryConfig,
    snapshot: &Snapshot<N, R>,
    event: Event<'_, N, R>,
) -> PublishReport {
    let registry = config.name;
    let mut report = PublishReport {
        stale: snapshot.stale,
        ..PublishReport::default()
    };

    for subscriber in &snapshot.live {
        match deliver(subscriber.as_ref(), event, config.catch_panics) {
            Ok(()) => {
                report.delivered += 1;
                log!(trace, registry = registry, subscriber = subscriber.name(), kind = event.kind(), "delivered");
            }
            Err(err) => {
                report.failed += 1;
                log!(warn, registry = registry, kind = event.kind(), error = %err, "delivery failed");
            }
        }
    }

    report
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
