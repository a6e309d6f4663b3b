//! # herald-core
//!
//! Core traits and payload types for the Herald event fan-out registry.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! subscriber implementations that don't need the registry itself.
//!
//! # Pieces
//!
//! - [`Subscriber`]: the downstream capability set (received, response, dropped)
//! - [`SubscriberId`]: identity of a subscriber, by `Arc` allocation
//! - [`Message`]: marker for payloads that can cross threads
//! - [`Notification`] / [`NotificationResponse`]: the bundled default payloads
//! - [`PublishReport`]: what a publish call did
//!
//! # Error Types
//!
//! - [`RegistryError`] - Rejected registry calls
//! - [`DeliveryError`] - Failures of a single subscriber during delivery

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod message;
mod notification;
mod report;
mod subscriber;

// Re-exports
pub use error::{BoxError, DeliveryError, RegistryError};
pub use message::Message;
pub use notification::{
    DEFAULT_ACTION_IDENTIFIER, Notification, NotificationContent, NotificationResponse,
};
pub use report::PublishReport;
pub use subscriber::{Subscriber, SubscriberId};
