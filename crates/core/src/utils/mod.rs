//! Shared utilities: clock abstraction and calendar helpers.

mod clock;
mod time_utils;

pub use clock::{ClockTrait, SystemClock};
pub use time_utils::{days_in_month, month_period};
