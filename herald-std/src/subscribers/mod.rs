//! Standard subscriber implementations.

pub mod channel;
pub mod logging;

pub use channel::{ChannelSubscriber, EventStream, SubscriberEvent};
pub use logging::LoggingSubscriber;
