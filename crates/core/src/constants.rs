use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed scale for all monetary values (2 fractional digits).
pub const MONEY_SCALE: u32 = 2;

/// Internal rounding scale for the spending/limit ratio, applied before the
/// final x100 scaling. Fixed policy, not configurable.
pub const PERCENTAGE_SCALE: u32 = 4;

/// Decimal precision for display values.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Percentage of the limit at which a WARNING alert fires.
pub const WARNING_THRESHOLD: Decimal = dec!(80.0);

/// Percentage of the limit at which the alert escalates to DANGER.
pub const DANGER_THRESHOLD: Decimal = dec!(100.0);

/// Earliest year a budget may be created for.
pub const MIN_BUDGET_YEAR: i32 = 2020;

/// Latest year a budget may be created for.
pub const MAX_BUDGET_YEAR: i32 = 2100;
