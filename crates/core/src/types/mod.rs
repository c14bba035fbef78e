//! Core types for Localprice.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod country;
pub mod currency;
pub mod id;
pub mod money;
pub mod selection;

pub use country::Country;
pub use currency::{CurrencyCode, CurrencyCodeError, RatePair};
pub use id::*;
pub use money::Money;
pub use selection::SelectedCurrency;
