use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for the services.
///
/// Injected so that calendar-sensitive logic (current-month alerts,
/// forecasting) is deterministic under test.
pub trait ClockTrait: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockTrait for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
