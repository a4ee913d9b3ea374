//! Bounded product-comparison tray.
//!
//! The tray is a sequence, not a set: the specs table renders columns in
//! insertion order so shoppers can track which card they clicked. Capacity
//! is fixed at four products; a fifth toggle is reported and rejected
//! without mutating the tray.

use thiserror::Error;
use tracing::debug;

use verdantia_core::{Product, ProductId};

use crate::catalog::Catalog;

/// Maximum number of products that fit in the comparison tray.
pub const COMPARE_LIMIT: usize = 4;

/// Non-fatal comparison tray errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    /// The tray already holds the maximum number of products.
    #[error("compare tray is full ({COMPARE_LIMIT} products max)")]
    LimitReached,
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The product was added to the tray.
    Added,
    /// The product was removed from the tray.
    Removed,
}

/// Insertion-ordered selection of products for side-by-side comparison.
#[derive(Debug, Clone, Default)]
pub struct CompareSet {
    ids: Vec<ProductId>,
}

impl CompareSet {
    /// Create an empty tray.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Toggle a product's membership.
    ///
    /// Removes the product if present; adds it if absent and there is room.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::LimitReached`] when adding would exceed
    /// [`COMPARE_LIMIT`]; the tray is left unchanged.
    pub fn toggle(&mut self, product_id: &ProductId) -> Result<ToggleOutcome, CompareError> {
        if let Some(position) = self.ids.iter().position(|id| id == product_id) {
            self.ids.remove(position);
            return Ok(ToggleOutcome::Removed);
        }
        if self.ids.len() >= COMPARE_LIMIT {
            debug!(product_id = %product_id, "compare tray full, rejecting add");
            return Err(CompareError::LimitReached);
        }
        self.ids.push(product_id.clone());
        Ok(ToggleOutcome::Added)
    }

    /// Remove a product unconditionally. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.ids.retain(|id| id != product_id);
    }

    /// Empty the tray.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Membership test used by product cards to render selection state.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.ids.contains(product_id)
    }

    /// Compared product ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of products in the tray.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the tray is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deduplicated union of spec keys across all compared products, ordered
    /// by first appearance (compare order, then key order within a product).
    ///
    /// Products missing a key render a placeholder rather than dropping the
    /// row, so the union drives the full spec table. Pure; recompute after
    /// every tray change.
    #[must_use]
    pub fn spec_key_union(&self, catalog: &Catalog) -> Vec<String> {
        let products = self.ids.iter().filter_map(|id| catalog.get(id));
        union_of_spec_keys(products)
    }
}

/// First-appearance-ordered, deduplicated union of spec keys.
pub fn union_of_spec_keys<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for product in products {
        for key in product.specs.keys() {
            if !keys.iter().any(|seen| seen == key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}
