//! # Phone Card Backend
//!
//! Domain logic for prepaid phone cards: per-zone call pricing, weekly fee
//! deduction and call history.
//!
//! ```text
//! Caller (billing harness, tests)
//!     ↓  shared DTOs
//! BillingService
//!     ↓
//! PhoneCard + CardProduct
//! ```

pub mod domain;

pub use domain::*;
