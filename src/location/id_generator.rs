//! Time-derived, strictly increasing record ids.

use chrono::Utc;

/// Issues millisecond-timestamp ids that never repeat.
///
/// Two ids requested within the same millisecond (or after the wall clock
/// steps backwards) are bumped past the previous one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the largest id already issued (e.g. the store's maximum).
    pub fn starting_after(last: Option<i64>) -> Self {
        Self { last }
    }

    /// Next id based on the current wall clock.
    ///
    /// `None` once `i64::MAX` has been issued.
    pub fn next_id(&mut self) -> Option<i64> {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id for an explicit clock reading.
    pub fn next_at(&mut self, now_ms: i64) -> Option<i64> {
        let id = match self.last {
            Some(last) if now_ms <= last => match last.checked_add(1) {
                Some(id) => id,
                None => {
                    tracing::error!("Location id space exhausted at {}", last);
                    return None;
                }
            },
            _ => now_ms,
        };
        self.last = Some(id);
        Some(id)
    }

    pub fn last(&self) -> Option<i64> {
        self.last
    }
}
