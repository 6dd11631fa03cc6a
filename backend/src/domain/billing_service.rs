//! Billing service for prepaid phone cards.
//!
//! Translates the request/response types in the `shared` crate into card
//! operations and formats the results for display. Pricing and the zone
//! check are left to the card; the service only reports what it applied.

use log::info;
use rust_decimal::Decimal;
use shared::{Call, CardSummary, ChargeCallRequest, ChargeCallResponse, WeeklyFeeResponse};

use super::models::phone_card::{CardError, ChargeOutcome, PhoneCard};

/// Display settings for the billing service
#[derive(Debug, Clone, PartialEq)]
pub struct BillingConfig {
    pub currency_symbol: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct BillingService {
    config: BillingConfig,
}

impl BillingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BillingConfig) -> Self {
        Self { config }
    }

    /// Charge the requested call to `card`.
    ///
    /// Running out of money is a normal outcome reported through
    /// `success: false`; a zone the card cannot call, or a cost too large
    /// to represent, is an error.
    pub fn charge_call(
        &self,
        card: &mut PhoneCard,
        request: ChargeCallRequest,
    ) -> Result<ChargeCallResponse, CardError> {
        let call = Call::from(request);
        let ChargeOutcome { success, cost } = card.try_charge(&call)?;

        let message = if success {
            format!("Charged {} for {}", self.format_amount(cost), call)
        } else {
            format!(
                "Insufficient balance: {} needed, {} available",
                self.format_amount(cost),
                self.format_amount(card.balance())
            )
        };
        info!("Card {}: {}", card.number(), message);

        Ok(ChargeCallResponse {
            success,
            cost,
            new_balance: card.balance(),
            formatted_cost: self.format_amount(cost),
            message,
        })
    }

    pub fn deduct_weekly_fee(&self, card: &mut PhoneCard) -> WeeklyFeeResponse {
        let previous_balance = card.balance();
        card.deduct_weekly_fee();
        let new_balance = card.balance();

        WeeklyFeeResponse {
            amount_deducted: previous_balance - new_balance,
            new_balance,
            formatted_balance: self.format_amount(new_balance),
        }
    }

    pub fn summarize(&self, card: &PhoneCard) -> CardSummary {
        CardSummary {
            number: card.number(),
            product_name: card.product().name.clone(),
            balance: card.balance(),
            formatted_balance: self.format_amount(card.balance()),
            call_count: card.calls().len(),
            total_minutes: card
                .calls()
                .iter()
                .map(|call| u64::from(call.duration_minutes()))
                .sum(),
        }
    }

    /// Format amount for display
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }

    pub fn get_config(&self) -> &BillingConfig {
        &self.config
    }
}
