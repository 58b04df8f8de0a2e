// Time Provider Port (for testability)
//
// Rule evaluation depends on "today"; injecting the clock keeps it
// deterministic in tests without mocking system time.

use chrono::NaiveDate;

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;

    /// Get the current calendar date (UTC)
    fn today(&self) -> NaiveDate;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}
