use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing zone of a call destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CallZone {
    Canada,
    Usa,
    Europe,
    Asia,
    /// Australia and New Zealand
    Anz,
    LatinAmerica,
}

impl CallZone {
    pub const ALL: [CallZone; 6] = [
        CallZone::Canada,
        CallZone::Usa,
        CallZone::Europe,
        CallZone::Asia,
        CallZone::Anz,
        CallZone::LatinAmerica,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CallZone::Canada => "CANADA",
            CallZone::Usa => "USA",
            CallZone::Europe => "EUROPE",
            CallZone::Asia => "ASIA",
            CallZone::Anz => "ANZ",
            CallZone::LatinAmerica => "LATINAM",
        }
    }
}

impl fmt::Display for CallZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single call charged (or to be charged) to a phone card.
///
/// Fields are private so a `Call` cannot change after construction; cards
/// keep their own clone of every call they record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Call {
    number: String,
    zone: CallZone,
    duration_minutes: u32,
}

impl Call {
    pub fn new(number: impl Into<String>, zone: CallZone, duration_minutes: u32) -> Self {
        Self {
            number: number.into(),
            zone,
            duration_minutes,
        }
    }

    /// Destination number, e.g. "+14167362100"
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn zone(&self) -> CallZone {
        self.zone
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "call to number {} in zone {} for {} minutes",
            self.number, self.zone, self.duration_minutes
        )
    }
}

/// Request for charging a call to a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeCallRequest {
    pub number: String,
    pub zone: CallZone,
    pub duration_minutes: u32,
}

impl From<ChargeCallRequest> for Call {
    fn from(request: ChargeCallRequest) -> Self {
        Call::new(request.number, request.zone, request.duration_minutes)
    }
}

/// Response after attempting to charge a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeCallResponse {
    /// false when the balance could not cover the call
    pub success: bool,
    pub cost: Decimal,
    pub new_balance: Decimal,
    pub formatted_cost: String,
    pub message: String,
}

/// Response after deducting the weekly fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFeeResponse {
    /// What was actually taken, which is less than the fee when the balance ran out
    pub amount_deducted: Decimal,
    pub new_balance: Decimal,
    pub formatted_balance: String,
}

/// Read-only overview of a card for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub number: u64,
    pub product_name: String,
    pub balance: Decimal,
    pub formatted_balance: String,
    pub call_count: usize,
    pub total_minutes: u64,
}
