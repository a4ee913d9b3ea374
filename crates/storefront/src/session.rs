//! Facade wiring the stores together for one shopper session.
//!
//! The view layer is a pure function of this session's state; every click
//! handler calls exactly one method here. Each store is owned by exactly one
//! session, so no synchronization is needed - all mutations are synchronous
//! and atomic with respect to each other, and the only suspension points are
//! the copilot's advice call and the payment simulation.

use std::sync::Arc;

use tracing::{info, instrument};

use verdantia_core::{Product, ProductId};

use crate::advisor::{AdviceContext, AdviceProvider};
use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutError, CheckoutOrchestrator, CheckoutStep, PaymentGateway};
use crate::compare::CompareSet;
use crate::copilot::{ChatMessage, CopilotError, CopilotSession};

/// Callback invoked (with no payload) when an order completes.
///
/// The caller owns any order-record persistence and user-facing
/// confirmation; the session only guarantees exactly one invocation per
/// completed checkout.
pub type CompletionCallback = Box<dyn FnMut() + Send>;

/// In-memory state for one shopper session.
pub struct StorefrontSession {
    catalog: Arc<Catalog>,
    cart: CartStore,
    compare: CompareSet,
    checkout: Option<CheckoutOrchestrator>,
    copilot: CopilotSession,
    on_order_complete: CompletionCallback,
}

impl StorefrontSession {
    /// Create a session over a catalog, with an injected advice provider
    /// and order-completion callback.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        advisor: Arc<dyn AdviceProvider>,
        on_order_complete: CompletionCallback,
    ) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            compare: CompareSet::new(),
            checkout: None,
            copilot: CopilotSession::new(advisor),
            on_order_complete,
        }
    }

    /// The session's catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable access to the cart store.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The comparison tray.
    #[must_use]
    pub const fn compare(&self) -> &CompareSet {
        &self.compare
    }

    /// Mutable access to the comparison tray.
    pub const fn compare_mut(&mut self) -> &mut CompareSet {
        &mut self.compare
    }

    /// The copilot message log.
    #[must_use]
    pub fn copilot_messages(&self) -> &[ChatMessage] {
        self.copilot.messages()
    }

    /// Add a product to the cart by id. Unknown ids are silent no-ops.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        if let Some(product) = self.catalog.get(product_id) {
            self.cart.add_to_cart(product, quantity, color, size);
        }
    }

    /// Enter checkout, returning the current step.
    ///
    /// Re-entering while a checkout is underway keeps the existing flow.
    pub fn begin_checkout(&mut self) -> CheckoutStep {
        self.checkout
            .get_or_insert_with(CheckoutOrchestrator::new)
            .step()
    }

    /// Current checkout step, if checkout has been entered.
    #[must_use]
    pub fn checkout_step(&self) -> Option<CheckoutStep> {
        self.checkout.as_ref().map(CheckoutOrchestrator::step)
    }

    /// Live subtotal shown throughout checkout.
    ///
    /// This is the cart's subtotal at call time, not a snapshot taken at
    /// checkout entry; only the step state is self-contained.
    #[must_use]
    pub fn checkout_subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    /// Advance the checkout flow one step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotStarted`] if checkout has not been
    /// entered.
    pub fn checkout_next(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.checkout
            .as_mut()
            .map(CheckoutOrchestrator::next)
            .ok_or(CheckoutError::NotStarted)
    }

    /// Submit payment and run the order to completion.
    ///
    /// On success the cart is cleared, the completion callback fires exactly
    /// once, and the checkout flow is discarded - no order record is kept
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotStarted`] if checkout has not been
    /// entered, or the orchestrator's rejection when the flow is not at the
    /// payment step.
    #[instrument(skip(self, gateway))]
    pub async fn submit_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<(), CheckoutError> {
        let checkout = self.checkout.as_mut().ok_or(CheckoutError::NotStarted)?;
        let amount = self.cart.subtotal();

        checkout.submit_payment(gateway, amount).await?;

        self.cart.clear();
        self.checkout = None;
        (self.on_order_complete)();
        info!(amount, "order completed, cart cleared");
        Ok(())
    }

    /// Exit checkout back to shopping, discarding the flow from any step.
    pub fn exit_checkout(&mut self) {
        self.checkout = None;
    }

    /// Ask the shopping copilot a question.
    ///
    /// The advice context carries the full catalog plus the products
    /// currently in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CopilotError::RequestInFlight`] if a request is already
    /// outstanding.
    pub async fn ask_copilot(&mut self, text: &str) -> Result<Vec<ChatMessage>, CopilotError> {
        let context = AdviceContext {
            products: self.catalog.products().to_vec(),
            cart: self.cart_products(),
        };
        self.copilot.send(text, &context).await
    }

    /// Products behind the current cart lines, in line order.
    fn cart_products(&self) -> Vec<Product> {
        self.cart
            .lines()
            .iter()
            .filter_map(|line| self.catalog.get(&line.product_id))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for StorefrontSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSession")
            .field("cart_items", &self.cart.item_count())
            .field("compared", &self.compare.len())
            .field("checkout", &self.checkout)
            .field("copilot", &self.copilot)
            .finish_non_exhaustive()
    }
}
