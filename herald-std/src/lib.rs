//! # herald-std
//!
//! Standard implementations for the Herald event fan-out registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], built with [`RegistryBuilder`]
//! - **Handles**: [`Publisher`] for the producer, [`Subscription`] guards for subscribers
//! - **Standard subscribers**: [`LoggingSubscriber`], [`ChannelSubscriber`]
//! - **Testing**: recording and failing subscribers in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

// Re-export core traits
pub use herald_core;

// Modules
pub mod handle;
pub mod registry;
pub mod subscribers;
pub mod testing;

pub use handle::{Publisher, Subscription};
pub use registry::{Registry, RegistryBuilder, RegistryConfig};
pub use subscribers::{ChannelSubscriber, EventStream, LoggingSubscriber, SubscriberEvent};
