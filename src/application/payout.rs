use crate::domain::notification::Notifications;
use crate::domain::payout::PayoutEngine;
use crate::error::{Result, ServiceError};

/// Key of the notification emitted when a payout falls back to a lower amount.
pub const FALLBACK_NOTIFICATION_KEY: &str = "Note";

/// Largest amount accepted for a payout request, in EUR.
///
/// The number of combinations grows quadratically with the amount; above this
/// the result set is too large to build and return.
pub const MAX_PAYOUT_AMOUNT: u32 = 10_000;

/// Answers payout requests: exact combinations, or the closest lower amount
/// that can be paid.
#[derive(Debug, Clone, Default)]
pub struct PayoutService {
    engine: PayoutEngine,
}

impl PayoutService {
    pub fn new(engine: PayoutEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PayoutEngine {
        &self.engine
    }

    /// Returns every canonical combination for `amount`.
    ///
    /// If `amount` cannot be paid exactly, the largest lower amount payable
    /// with the smallest denomination is used instead and a single `"Note"`
    /// notification names both amounts. An empty result with no notification
    /// means nothing can be paid.
    pub fn get_payout_combinations(
        &self,
        amount: i64,
        notifications: &mut Notifications,
    ) -> Result<Vec<String>> {
        let requested = u32::try_from(amount)
            .ok()
            .filter(|&requested| requested <= MAX_PAYOUT_AMOUNT)
            .ok_or_else(|| {
                ServiceError::InvalidArgument(format!(
                    "payout amount must be between 0 and {MAX_PAYOUT_AMOUNT}, got {amount}"
                ))
            })?;

        let combinations = self.engine.find_combinations(requested);
        if !combinations.is_empty() {
            return Ok(combinations.iter().map(ToString::to_string).collect());
        }

        let closest = self.engine.closest_payable(requested);
        if closest == requested {
            return Ok(Vec::new());
        }

        let combinations = self.engine.find_combinations(closest);
        if combinations.is_empty() {
            tracing::debug!(requested, closest, "no payout possible");
            return Ok(Vec::new());
        }

        tracing::info!(requested, closest, "payout fell back to closest amount");
        notifications.add(
            FALLBACK_NOTIFICATION_KEY,
            format!(
                "You requested {requested} EUR, but the closest possible payout is {closest} EUR."
            ),
        );
        Ok(combinations.iter().map(ToString::to_string).collect())
    }
}
