//! Verdantia Core - Shared types library.
//!
//! This crate provides common types used across all Verdantia components:
//! - `storefront` - The in-memory session engine (cart, compare, checkout, copilot)
//! - `integration-tests` - Cross-component scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, products, and
//!   chat roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
