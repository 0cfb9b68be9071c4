use chrono::Utc;
use compact_str::CompactString;

use crate::domain::HomeworkStatus;

/// Everything the poller remembers between cycles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    pub last_seen_status: Option<HomeworkStatus>,
    pub last_error_message: Option<CompactString>,
    /// Unix seconds sent as `from_date`
    pub cursor_timestamp: i64,
}

impl PollState {
    pub fn new(cursor_timestamp: i64) -> Self {
        Self {
            cursor_timestamp,
            ..Default::default()
        }
    }

    /// Initial state whose cursor reaches `lookback_secs` into the past
    pub fn starting_now(lookback_secs: u64) -> Self {
        let lookback = i64::try_from(lookback_secs).unwrap_or(i64::MAX);
        Self::new(Utc::now().timestamp().saturating_sub(lookback))
    }

    /// Record a diagnostic; returns `false` when it repeats the previous one
    pub fn remember_error(&mut self, message: &str) -> bool {
        if self.last_error_message.as_deref() == Some(message) {
            return false;
        }
        self.last_error_message = Some(message.into());
        true
    }

    pub fn clear_error(&mut self) {
        self.last_error_message = None;
    }
}
