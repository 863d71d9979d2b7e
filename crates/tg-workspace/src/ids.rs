use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Largest stored id that [`IdGenerator::observe`] seeds the sequence with.
pub const OBSERVE_CEILING: i64 = i64::MAX / 2;

/// Hands out clock-derived ids: the current time in milliseconds, bumped
/// so that every id is strictly greater than the previous one.
///
/// Clones share the same sequence.
///
/// Observed ids above [`OBSERVE_CEILING`] do not move the sequence, so it
/// always has room to keep increasing.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Arc<AtomicI64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev.saturating_add(1)).to_string()
    }

    /// Make sure ids issued from now on sort after `id`. Non-numeric ids
    /// and ids above [`OBSERVE_CEILING`] are ignored.
    pub fn observe(&self, id: &str) {
        match id.parse::<i64>() {
            Ok(value) if value <= OBSERVE_CEILING => {
                self.last.fetch_max(value, Ordering::SeqCst);
            }
            Ok(value) => {
                tracing::warn!(id = value, "Ignoring out of range id");
            }
            Err(_) => {}
        }
    }
}
