//! Threshold classification for budget alerts.

use chrono::{Datelike, NaiveDate};
use rust_decimal::RoundingStrategy;

use crate::constants::{DANGER_THRESHOLD, DISPLAY_DECIMAL_PRECISION, WARNING_THRESHOLD};
use crate::errors::Result;
use crate::utils::days_in_month;

use super::budgets_model::{AlertLevel, BudgetEvaluation};

pub(crate) struct AlertClassification {
    pub level: AlertLevel,
    pub message: String,
    pub days_left_in_month: u32,
}

/// Maps an evaluation's percentage and the calendar context to an alert.
///
/// Returns `None` below the warning threshold. The message formats are an
/// exact string contract consumed by existing clients:
/// - DANGER:  `Budget exceeded by {overage}%`, overage at 2 decimals
/// - WARNING: `{percent}% of budget used with {days} days remaining`,
///   percent rounded half-up to an integer
///
/// Calendar-agnostic: trusts the caller to pass a `today` consistent with
/// the budget's own month/year (the alerts listing restricts input to the
/// current month).
pub(crate) fn classify(
    evaluation: &BudgetEvaluation,
    today: NaiveDate,
) -> Result<Option<AlertClassification>> {
    let percentage = evaluation.percentage_used;
    if percentage < WARNING_THRESHOLD {
        return Ok(None);
    }

    let days_left_in_month = days_in_month(evaluation.budget.month, evaluation.budget.year)?
        .saturating_sub(today.day());

    let classification = if percentage >= DANGER_THRESHOLD {
        let mut overage = (percentage - DANGER_THRESHOLD).round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        );
        overage.rescale(DISPLAY_DECIMAL_PRECISION);
        AlertClassification {
            level: AlertLevel::Danger,
            message: format!("Budget exceeded by {}%", overage),
            days_left_in_month,
        }
    } else {
        // Round half-up on the Decimal; `{:.0}` on a float would round
        // half-to-even and change the displayed text.
        let whole = percentage.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        AlertClassification {
            level: AlertLevel::Warning,
            message: format!(
                "{}% of budget used with {} days remaining",
                whole, days_left_in_month
            ),
            days_left_in_month,
        }
    };
    Ok(Some(classification))
}
