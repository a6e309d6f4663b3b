//! # herald - In-Process Event Fan-Out
//!
//! `herald` sits between exactly one producer of notification events and any
//! number of subscribers. Notifications and drop signals are broadcast as they
//! arrive. Responses are broadcast too, except when nobody is subscribed: then
//! they are kept, in order, for the first subscriber that shows up.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::{BoxError, Notification, NotificationResponse, Registry, Subscriber};
//! use std::sync::Arc;
//!
//! struct Badge;
//!
//! impl Subscriber for Badge {
//!     fn on_received(&self, n: &Notification) -> Result<(), BoxError> { Ok(()) }
//!     fn on_response_received(&self, r: &NotificationResponse) -> Result<(), BoxError> { Ok(()) }
//! }
//!
//! let registry: Registry = Registry::new();
//! let publisher = registry.publisher();      // hand this to the producer
//!
//! let badge = Arc::new(Badge);
//! let _subscription = registry.subscribe(&badge);
//! publisher.received(&Notification::new("msg-1").title("Hi"));
//! ```
//!
//! The registry never keeps a subscriber alive. Dropping the last `Arc` to a
//! subscriber stops deliveries to it, with or without unregistering.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Errors
    BoxError,
    // Payloads
    DEFAULT_ACTION_IDENTIFIER,
    DeliveryError,
    // Core traits
    Message,
    Notification,
    NotificationContent,
    NotificationResponse,
    PublishReport,
    RegistryError,
    Subscriber,
    SubscriberId,
};

// Registry
pub use herald_std::{Publisher, Registry, RegistryBuilder, RegistryConfig, Subscription};

/// Standard subscriber implementations.
pub mod subscribers {
    pub use herald_std::subscribers::{
        ChannelSubscriber, EventStream, LoggingSubscriber, SubscriberEvent,
    };
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{Failure, FailingSubscriber, Recorded, RecordingSubscriber};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Message, Notification, NotificationResponse, Publisher, Registry, Subscriber,
        Subscription,
    };
}

#[cfg(feature = "macros")]
pub use herald_macros::Message;
