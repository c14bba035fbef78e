//! Localprice Core - Shared types library.
//!
//! This crate provides common types used across all Localprice components:
//! - `widget` - The storefront currency-conversion engine
//! - `admin` - The curated-selection service behind the admin panel
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no network clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere, including inside host-page adapters.
//!
//! # Modules
//!
//! - [`types`] - Currency codes, countries, curated selection entries, money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
