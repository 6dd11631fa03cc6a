//! Domain model for a prepaid phone card.
//!
//! A card owns its balance and its call history outright. Reading the
//! history hands out either a borrowed slice or an owned copy, and `charge`
//! stores its own clone of the call, so nothing outside the card can ever
//! alter what it recorded.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use shared::{Call, CallZone};
use std::collections::BTreeSet;
use std::fmt;

use super::card_product::CardProduct;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("Card number must be positive")]
    InvalidNumber,
    #[error("Card password must be positive")]
    InvalidPassword,
    #[error("Calls to zone {0} are not allowed on this card")]
    ZoneNotAllowed(CallZone),
    #[error("Balance cannot be negative: {0}")]
    NegativeBalance(Decimal),
    #[error("Invalid card product: {0}")]
    InvalidProduct(String),
    #[error("Cost of {minutes} minutes at {price_per_min} per minute is out of range")]
    CostOverflow { price_per_min: Decimal, minutes: u32 },
}

/// Result of a charge attempt that went through pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeOutcome {
    /// false when the balance could not cover `cost`
    pub success: bool,
    pub cost: Decimal,
}

/// Two cards are equal when they are the same product with the same
/// number, password, balance and call history (same calls, same order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCard {
    number: u64,
    password: u32,
    balance: Decimal,
    product: CardProduct,
    call_history: Vec<Call>,
}

impl PhoneCard {
    /// Create a card of the given product with the product's initial balance
    /// and no calls. The product is validated first, so a card never
    /// starts below zero or carries a negative price or fee.
    pub fn new(number: u64, password: u32, product: CardProduct) -> Result<Self, CardError> {
        if number == 0 {
            return Err(CardError::InvalidNumber);
        }
        if password == 0 {
            return Err(CardError::InvalidPassword);
        }
        product
            .validate()
            .map_err(|e| CardError::InvalidProduct(e.to_string()))?;
        Ok(Self {
            number,
            password,
            balance: product.initial_balance,
            product,
            call_history: Vec::new(),
        })
    }

    pub fn smart_americas_10(number: u64, password: u32) -> Result<Self, CardError> {
        Self::new(number, password, CardProduct::smart_americas_10())
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn password(&self) -> u32 {
        self.password
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn set_balance(&mut self, balance: Decimal) -> Result<(), CardError> {
        if balance < Decimal::ZERO {
            return Err(CardError::NegativeBalance(balance));
        }
        self.balance = balance;
        Ok(())
    }

    pub fn product(&self) -> &CardProduct {
        &self.product
    }

    pub fn allowed_zones(&self) -> BTreeSet<CallZone> {
        self.product.allowed_zones()
    }

    pub fn is_allowed(&self, zone: CallZone) -> bool {
        self.product.is_allowed(zone)
    }

    pub fn cost_per_min(&self, zone: CallZone) -> Result<Decimal, CardError> {
        self.product
            .cost_per_min(zone)
            .ok_or(CardError::ZoneNotAllowed(zone))
    }

    /// Cost of `call` on this card without charging it
    pub fn cost_of(&self, call: &Call) -> Result<Decimal, CardError> {
        let price_per_min = self.cost_per_min(call.zone())?;
        let minutes = call.duration_minutes();
        price_per_min
            .checked_mul(Decimal::from(minutes))
            .ok_or(CardError::CostOverflow { price_per_min, minutes })
    }

    /// Take the weekly fee off the balance; the balance stops at zero.
    pub fn deduct_weekly_fee(&mut self) {
        let new_balance = (self.balance - self.product.weekly_fee).max(Decimal::ZERO);
        debug!(
            "Card {}: weekly fee {} deducted, balance {} -> {}",
            self.number, self.product.weekly_fee, self.balance, new_balance
        );
        self.balance = new_balance;
    }

    /// Try to charge `call` to the card.
    ///
    /// Returns `Ok(true)` and records a copy of the call when the balance
    /// covers its cost, `Ok(false)` with no change when it does not. A call
    /// to a zone this card cannot reach is an error and also changes nothing.
    pub fn charge(&mut self, call: &Call) -> Result<bool, CardError> {
        self.try_charge(call).map(|outcome| outcome.success)
    }

    /// Same as [`PhoneCard::charge`], also reporting the cost that was
    /// (or would have been) taken.
    pub fn try_charge(&mut self, call: &Call) -> Result<ChargeOutcome, CardError> {
        let cost = match self.cost_of(call) {
            Ok(cost) => cost,
            Err(e) => {
                warn!("Card {}: rejected {}: {}", self.number, call, e);
                return Err(e);
            }
        };

        if self.balance < cost {
            info!(
                "Card {}: insufficient balance {} for {} costing {}",
                self.number, self.balance, call, cost
            );
            return Ok(ChargeOutcome { success: false, cost });
        }

        self.balance -= cost;
        self.call_history.push(call.clone());
        debug!(
            "Card {}: charged {} for {}, balance now {}",
            self.number, cost, call, self.balance
        );
        Ok(ChargeOutcome { success: true, cost })
    }

    /// Calls charged so far, oldest first
    pub fn calls(&self) -> &[Call] {
        &self.call_history
    }

    /// Owned copy of the call history; changing it leaves the card untouched.
    pub fn call_history(&self) -> Vec<Call> {
        self.call_history.clone()
    }
}

impl fmt::Display for PhoneCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} card {} with balance ${:.2} and {} calls",
            self.product.name,
            self.number,
            self.balance,
            self.call_history.len()
        )
    }
}
