#![allow(dead_code)]

use herald::{BoxError, Message, Registry, Subscriber};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Payload Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivered {
    pub id: u32,
}

impl Message for Delivered {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tapped {
    pub id: u32,
}

impl Message for Tapped {}

pub type TestRegistry = Registry<Delivered, Tapped>;

pub fn delivered(id: u32) -> Delivered {
    Delivered { id }
}

pub fn tapped(id: u32) -> Tapped {
    Tapped { id }
}

// ============================================================================
// Test Subscribers
// ============================================================================

/// Counts calls per callback.
#[derive(Default)]
pub struct CountingSubscriber {
    pub received: AtomicUsize,
    pub responses: AtomicUsize,
    pub dropped: AtomicUsize,
}

impl CountingSubscriber {
    pub fn total(&self) -> usize {
        self.received.load(Ordering::SeqCst)
            + self.responses.load(Ordering::SeqCst)
            + self.dropped.load(Ordering::SeqCst)
    }
}

impl Subscriber<Delivered, Tapped> for CountingSubscriber {
    fn on_received(&self, _notification: &Delivered) -> Result<(), BoxError> {
        self.received.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_response_received(&self, _response: &Tapped) -> Result<(), BoxError> {
        self.responses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_dropped(&self) -> Result<(), BoxError> {
        self.dropped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Appends `(subscriber id, response id)` to a shared log.
pub struct OrderRecordingSubscriber {
    pub id: usize,
    pub order: Arc<Mutex<Vec<(usize, u32)>>>,
}

impl Subscriber<Delivered, Tapped> for OrderRecordingSubscriber {
    fn on_received(&self, _notification: &Delivered) -> Result<(), BoxError> {
        Ok(())
    }

    fn on_response_received(&self, response: &Tapped) -> Result<(), BoxError> {
        self.order.lock().unwrap().push((self.id, response.id));
        Ok(())
    }
}
