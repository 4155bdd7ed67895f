//! End-of-month spending projection from the current pace.

use chrono::{Datelike, Duration, NaiveDate};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::money::MoneyAmount;
use crate::utils::days_in_month;

use super::budgets_model::{BudgetEvaluation, SpendingForecast};

/// Projects end-of-month spending for one evaluated budget.
///
/// `daily_average = spending / today.day()`, `projected = daily_average x
/// days in month`. A zero daily average never projects an overage. The
/// exceed date is `today + ceil(remaining / daily_average)` days, clamped
/// to today when the budget is already over its limit.
pub(crate) fn estimate(
    evaluation: &BudgetEvaluation,
    today: NaiveDate,
) -> Result<SpendingForecast> {
    let days_elapsed = today.day();
    let total_days = days_in_month(evaluation.budget.month, evaluation.budget.year)?;

    // day() >= 1 for any real date; the guard keeps the degenerate case total.
    let daily_average = if days_elapsed == 0 {
        MoneyAmount::zero()
    } else {
        evaluation
            .spending
            .div_scalar(Decimal::from(days_elapsed))?
    };

    let projected_spending = daily_average.mul_scalar(Decimal::from(total_days));

    let will_exceed =
        !daily_average.is_zero() && projected_spending > evaluation.budget.limit_amount;

    let projected_exceed_date = if will_exceed {
        let headroom = evaluation.budget.limit_amount - evaluation.spending;
        let days_to_exceed = (headroom.amount() / daily_average.amount())
            .ceil()
            .to_i64()
            .unwrap_or(0)
            .max(0);
        // None only when the projection falls outside chrono's range.
        today.checked_add_signed(Duration::days(days_to_exceed))
    } else {
        None
    };

    Ok(SpendingForecast {
        daily_average,
        projected_spending,
        will_exceed,
        projected_exceed_date,
    })
}
