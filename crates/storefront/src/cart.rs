//! Cart line bookkeeping and totals.
//!
//! The cart merges repeated adds of the same product into one line; there is
//! never more than one line per product id. Operations on unknown ids are
//! silent no-ops by contract - the UI disables what cannot be clicked, and
//! the store does not second-guess it. Stock limits are likewise a UI
//! concern, not enforced here.

use serde::{Deserialize, Serialize};

use verdantia_core::{Price, Product, ProductId};

/// One product's accumulated quantity and chosen variant within the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Accumulated quantity, always >= 1 while the line exists.
    pub quantity: u32,
    /// Unit price copied from the product when the line was created.
    pub unit_price: Price,
    /// Selected color, if the product has color variants.
    pub color: Option<String>,
    /// Selected size, if the product has size variants.
    pub size: Option<String>,
}

/// Quantities of selected products for one shopper session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// If a line for the same product id already exists, its quantity is
    /// incremented and the original variant selection is kept; otherwise a
    /// new line is appended. Adding zero units is a no-op.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity += quantity;
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            quantity,
            unit_price: product.price,
            color,
            size,
        });
    }

    /// Add one unit of a product with no variant selection.
    pub fn add(&mut self, product: &Product) {
        self.add_to_cart(product, 1, None, None);
    }

    /// Adjust a line's quantity by a signed delta.
    ///
    /// The line is removed entirely when the resulting quantity drops to
    /// zero or below. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, delta: i64) {
        let Some(position) = self
            .lines
            .iter()
            .position(|line| &line.product_id == product_id)
        else {
            return;
        };
        if let Some(line) = self.lines.get_mut(position) {
            let updated = i64::from(line.quantity) + delta;
            if updated <= 0 {
                self.lines.remove(position);
            } else {
                // Bounded by the i64 check above; quantities stay small in practice.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    line.quantity = updated as u32;
                }
            }
        }
    }

    /// Remove a line unconditionally. Unknown ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product_id != product_id);
    }

    /// Empty the cart. Called on checkout completion.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price x quantity` over all lines, in whole currency units.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| line.unit_price.amount * u64::from(line.quantity))
            .sum()
    }

    /// Sum of quantities across all lines, used for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
