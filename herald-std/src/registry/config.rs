//! Registry configuration and builder.

use super::Registry;
use herald_core::{Message, Notification, NotificationResponse};
use std::marker::PhantomData;

/// Resolved registry settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Label attached to every log line emitted by the registry.
    pub name: &'static str,
    /// Remove entries whose subscriber was dropped while taking a broadcast
    /// snapshot. When enabled, a registry whose entries are all stale counts
    /// as empty and buffers responses.
    pub prune_stale: bool,
    /// Catch panicking callbacks and count them as failures. When disabled a
    /// panic unwinds out of the publish or register call that triggered it.
    pub catch_panics: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "herald",
            prune_stale: true,
            catch_panics: true,
        }
    }
}

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry: Registry = Registry::builder()
///     .name("notifications")
///     .prune_stale(true)
///     .catch_panics(true)
///     .build();
/// ```
pub struct RegistryBuilder<N: Message = Notification, R: Message = NotificationResponse> {
    config: RegistryConfig,
    _marker: PhantomData<fn() -> (N, R)>,
}

impl<N: Message, R: Message> RegistryBuilder<N, R> {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Set the log label.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Enable or disable pruning of stale entries during broadcasts.
    pub fn prune_stale(mut self, prune: bool) -> Self {
        self.config.prune_stale = prune;
        self
    }

    /// Enable or disable catching of panicking callbacks.
    pub fn catch_panics(mut self, catch: bool) -> Self {
        self.config.catch_panics = catch;
        self
    }

    /// The settings collected so far.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build the registry.
    pub fn build(self) -> Registry<N, R> {
        Registry::with_config(self.config)
    }
}

impl<N: Message, R: Message> Default for RegistryBuilder<N, R> {
    fn default() -> Self {
        Self::new()
    }
}
