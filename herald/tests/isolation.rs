use herald::{
    BoxError, Registry, Subscriber, Subscription,
    testing::{FailingSubscriber, Failure, RecordingSubscriber},
};
use std::sync::{Arc, Mutex};

mod common;
use common::{Delivered, Tapped, TestRegistry, delivered, tapped};

type Recorder = RecordingSubscriber<Delivered, Tapped>;

#[test]
fn test_erroring_subscriber_does_not_block_others() {
    let registry = TestRegistry::new();
    let failing = Arc::new(FailingSubscriber::new(Failure::Error));
    let healthy = Arc::new(Recorder::new());
    registry.register(&failing);
    registry.register(&healthy);

    let report = registry.publish_received(&delivered(1));
    assert_eq!((report.delivered, report.failed), (1, 1));

    let report = registry.publish_response(tapped(2));
    assert_eq!((report.delivered, report.failed), (1, 1));

    let report = registry.publish_dropped();
    assert_eq!((report.delivered, report.failed), (1, 1));

    assert_eq!(healthy.count(), 3);
    assert_eq!(failing.attempts(), 3);
}

#[test]
fn test_panicking_subscriber_does_not_reach_producer() {
    let registry = TestRegistry::new();
    let panicking = Arc::new(FailingSubscriber::new(Failure::Panic));
    let healthy = Arc::new(Recorder::new());
    registry.register(&panicking);
    registry.register(&healthy);

    let report = registry.publish_received(&delivered(1));
    assert_eq!((report.delivered, report.failed), (1, 1));

    // The registry keeps working after a caught panic.
    registry.publish_response(tapped(2));
    assert_eq!(healthy.count(), 2);
    assert_eq!(panicking.attempts(), 2);
}

#[test]
fn test_panicking_first_subscriber_still_drains_queue() {
    let registry = TestRegistry::new();
    registry.publish_response(tapped(1));
    registry.publish_response(tapped(2));

    let panicking = Arc::new(FailingSubscriber::new(Failure::Panic));
    registry.register(&panicking);
    assert_eq!(panicking.attempts(), 2);
    assert_eq!(registry.pending_len(), 0);

    let late = Arc::new(Recorder::new());
    registry.register(&late);
    assert!(late.events().is_empty());

    registry.publish_response(tapped(3));
    assert_eq!(late.responses(), vec![tapped(3)]);
}

/// Registers a companion subscriber from inside its own callback.
struct Recruiter {
    registry: TestRegistry,
    recruit: Arc<RecordingSubscriber<Delivered, Tapped>>,
}

impl Subscriber<Delivered, Tapped> for Recruiter {
    fn on_received(&self, _notification: &Delivered) -> Result<(), BoxError> {
        self.registry.register(&self.recruit);
        Ok(())
    }

    fn on_response_received(&self, _response: &Tapped) -> Result<(), BoxError> {
        self.registry.unregister(&self.recruit);
        Ok(())
    }
}

#[test]
fn test_callbacks_may_reenter_the_registry() {
    let registry = TestRegistry::new();
    let recruit = Arc::new(Recorder::new());
    let recruiter = Arc::new(Recruiter {
        registry: registry.clone(),
        recruit: recruit.clone(),
    });
    registry.register(&recruiter);

    // The recruit joins during this broadcast but is not part of its snapshot.
    registry.publish_received(&delivered(1));
    assert!(registry.contains(&recruit));
    assert!(recruit.events().is_empty());

    registry.publish_received(&delivered(2));
    assert_eq!(recruit.received(), vec![delivered(2)]);

    registry.publish_response(tapped(3));
    assert!(!registry.contains(&recruit));
}

/// Holds its own subscription and releases it when dropped.
struct SelfManaged {
    seen: Mutex<Vec<u32>>,
    subscription: Mutex<Option<Subscription<Delivered, Tapped>>>,
}

impl Subscriber<Delivered, Tapped> for SelfManaged {
    fn on_received(&self, notification: &Delivered) -> Result<(), BoxError> {
        self.seen.lock().unwrap().push(notification.id);
        Ok(())
    }

    fn on_response_received(&self, _response: &Tapped) -> Result<(), BoxError> {
        Ok(())
    }
}

#[test]
fn test_subscriber_owning_its_subscription() {
    let registry: Registry<Delivered, Tapped> = Registry::new();
    let sub = Arc::new(SelfManaged {
        seen: Mutex::new(Vec::new()),
        subscription: Mutex::new(None),
    });
    *sub.subscription.lock().unwrap() = Some(registry.subscribe(&sub));

    registry.publish_received(&delivered(1));
    assert_eq!(*sub.seen.lock().unwrap(), vec![1]);

    // Dropping the subscriber drops the guard, which unregisters it.
    drop(sub);
    assert!(registry.is_empty());
}
