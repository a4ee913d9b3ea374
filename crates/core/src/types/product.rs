//! Product record supplied by the catalog provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::status::CarbonFootprint;

/// An immutable product record.
///
/// Products are handed to the session engine by the catalog provider at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in whole currency units.
    pub price: Price,
    /// Category handle (e.g., "audio", "wearables").
    pub category: String,
    /// Marketing description.
    pub description: String,
    /// Ordered image references.
    pub images: Vec<String>,
    /// Spec-name to spec-value table. Insertion order is irrelevant, so keys
    /// are kept sorted for deterministic iteration.
    pub specs: BTreeMap<String, String>,
    /// Average review rating.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Whether the product supports AR preview.
    pub ar_capable: bool,
    /// Units in stock.
    pub stock: u32,
    /// Carbon-footprint classification.
    pub carbon_footprint: CarbonFootprint,
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
