//! # Domain Module
//!
//! - **models::card_product**: product configuration (zones, prices, initial balance, weekly fee)
//! - **models::phone_card**: the card itself, its balance and its call history
//! - **billing_service**: maps `shared` requests onto cards and formats the results
//!
//! ## Business Rules
//!
//! - A card's balance never goes below zero
//! - A call is recorded only when it was successfully charged
//! - Weekly fees stop at a zero balance instead of failing
//! - Zones outside a card's product cannot be charged

pub mod billing_service;
pub mod models;

pub use billing_service::*;
pub use models::card_product::{CardProduct, ProductConfigError};
pub use models::phone_card::{CardError, ChargeOutcome, PhoneCard};
