//! Core types for Verdantia.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::{CarbonFootprint, ChatRole};
