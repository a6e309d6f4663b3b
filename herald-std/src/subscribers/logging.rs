//! Logging subscriber for event observation.

use herald_core::{BoxError, Message, Subscriber};
use std::fmt::Debug;

/// A subscriber that logs every event it receives.
///
/// Register one next to the real subscribers to see what the producer emits.
/// Without the `tracing` feature it accepts events and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSubscriber;

impl<N, R> Subscriber<N, R> for LoggingSubscriber
where
    N: Message + Debug,
    R: Message + Debug,
{
    fn on_received(&self, notification: &N) -> Result<(), BoxError> {
        log!(info, ?notification, "notification received");
        #[cfg(not(feature = "tracing"))]
        {
            let _ = notification;
        }
        Ok(())
    }

    fn on_response_received(&self, response: &R) -> Result<(), BoxError> {
        log!(info, ?response, "notification response received");
        #[cfg(not(feature = "tracing"))]
        {
            let _ = response;
        }
        Ok(())
    }

    fn on_dropped(&self) -> Result<(), BoxError> {
        log!(info, "notifications dropped");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
