//! Error types for Herald.
//!
//! - [`RegistryError`] - Rejected registry calls (programmer errors)
//! - [`DeliveryError`] - A single subscriber failed to take an event
//!
//! Delivery errors never leave a publish call. They are logged and counted in
//! the [`PublishReport`](crate::PublishReport).

use thiserror::Error;

/// A boxed error type returned by subscriber callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by registry calls that reject their input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The weak subscriber reference passed in no longer resolves.
    #[error("subscriber reference does not resolve to a live subscriber")]
    SubscriberGone,
}

/// Errors raised while delivering an event to one subscriber.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The callback returned an error.
    #[error("subscriber `{subscriber}` failed: {source}")]
    Callback {
        /// Name of the failing subscriber.
        subscriber: &'static str,
        /// The error returned by the callback.
        #[source]
        source: BoxError,
    },

    /// The callback panicked.
    #[error("subscriber `{subscriber}` panicked: {message}")]
    Panicked {
        /// Name of the failing subscriber.
        subscriber: &'static str,
        /// Panic payload rendered as text.
        message: String,
    },

    /// The subscriber's downstream receiver has gone away.
    #[error("subscriber channel is closed")]
    Closed,
}

impl DeliveryError {
    /// Wraps a callback error for the named subscriber.
    pub fn callback(subscriber: &'static str, source: BoxError) -> Self {
        Self::Callback { subscriber, source }
    }

    /// Returns `true` if the failure came from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_error_display_includes_subscriber() {
        let err = DeliveryError::callback("bridge", "socket reset".into());
        assert_eq!(err.to_string(), "subscriber `bridge` failed: socket reset");
        assert!(!err.is_panic());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_panicked_error() {
        let err = DeliveryError::Panicked {
            subscriber: "ui",
            message: "boom".into(),
        };
        assert!(err.is_panic());
        assert_eq!(err.to_string(), "subscriber `ui` panicked: boom");
    }

    #[test]
    fn test_closed_is_boxable() {
        let boxed: BoxError = Box::new(DeliveryError::Closed);
        assert_eq!(boxed.to_string(), "subscriber channel is closed");
    }
}
