//! Outcome of a publish call.

/// What a single publish call did.
///
/// Publishing never fails; this is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// Subscribers whose callback completed successfully.
    pub delivered: usize,
    /// Entries skipped because the subscriber no longer exists.
    pub stale: usize,
    /// Subscribers whose callback returned an error or panicked.
    pub failed: usize,
    /// Whether the response went to the pending queue because nobody was
    /// subscribed.
    pub buffered: bool,
    /// Whether the response was parked while a new subscriber was receiving
    /// the pending queue. It is broadcast right after that, so the counts of
    /// this report stay at zero.
    pub deferred: bool,
}

impl PublishReport {
    /// Report for a response that was queued for the next subscriber.
    pub const fn buffered() -> Self {
        Self {
            delivered: 0,
            stale: 0,
            failed: 0,
            buffered: true,
            deferred: false,
        }
    }

    /// Report for a response parked behind an in-flight drain.
    pub const fn deferred() -> Self {
        Self {
            delivered: 0,
            stale: 0,
            failed: 0,
            buffered: false,
            deferred: true,
        }
    }

    /// Number of subscribers the event was handed to.
    pub const fn attempted(&self) -> usize {
        self.delivered + self.failed
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: PublishReport) {
        self.delivered += other.delivered;
        self.stale += other.stale;
        self.failed += other.failed;
        self.buffered |= other.buffered;
        self.deferred |= other.deferred;
    }
}
