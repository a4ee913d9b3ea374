//! Linear checkout state machine.
//!
//! Three forward-only steps (address, delivery, payment) followed by an
//! asynchronous payment-simulation phase. Advancement is deliberately not
//! gated on field validation; the source flow lets shoppers click through
//! empty forms, and that observable behavior is preserved. The only escape
//! hatch is discarding the orchestrator entirely (exit to shopping).
//!
//! The subtotal shown during checkout is the live cart subtotal; the
//! orchestrator owns nothing but its own step state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

/// One stage of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Shipping address entry.
    Address,
    /// Delivery option selection.
    Delivery,
    /// Payment details entry.
    Payment,
    /// Payment submitted, simulation outstanding.
    Processing,
    /// Order completed; the orchestrator is discarded after this.
    Complete,
}

/// Checkout flow errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout has not been entered yet.
    #[error("checkout has not been entered")]
    NotStarted,
    /// Payment can only be submitted from the payment step.
    #[error("payment can only be submitted from the payment step")]
    NotAtPayment,
    /// A payment submission is already outstanding.
    #[error("payment is already processing")]
    AlreadyProcessing,
    /// The order already completed.
    #[error("checkout is already complete")]
    AlreadyComplete,
}

/// Asynchronous boundary for the payment step.
///
/// Production uses [`SimulatedGateway`]; tests inject an instant
/// implementation so nothing sleeps. The simulation cannot fail - once
/// started it runs to completion.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Process a payment for `amount` whole currency units.
    async fn process(&self, amount: u64);
}

/// Fixed-delay payment simulation standing in for a real processor.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// Create a gateway that resolves after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn process(&self, amount: u64) {
        info!(amount, delay = ?self.delay, "simulating payment");
        tokio::time::sleep(self.delay).await;
    }
}

/// Forward-only checkout state machine for one order attempt.
#[derive(Debug)]
pub struct CheckoutOrchestrator {
    step: CheckoutStep,
}

impl Default for CheckoutOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutOrchestrator {
    /// Enter checkout at the address step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: CheckoutStep::Address,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether the order has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Advance one step: address -> delivery -> payment.
    ///
    /// No field validation gates advancement. From the payment step onward
    /// this is a no-op; leaving payment requires [`Self::submit_payment`].
    /// Returns the step after the call.
    pub fn next(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Address => CheckoutStep::Delivery,
            CheckoutStep::Delivery => CheckoutStep::Payment,
            step @ (CheckoutStep::Payment | CheckoutStep::Processing | CheckoutStep::Complete) => {
                step
            }
        };
        self.step
    }

    /// Submit payment: payment -> processing -> complete.
    ///
    /// Awaits the injected gateway while in the processing step. The caller
    /// clears the cart and fires the completion callback once this returns.
    ///
    /// # Errors
    ///
    /// Rejected unless the flow is at the payment step: earlier steps yield
    /// [`CheckoutError::NotAtPayment`], an outstanding submission yields
    /// [`CheckoutError::AlreadyProcessing`], and a finished order yields
    /// [`CheckoutError::AlreadyComplete`].
    #[instrument(skip(self, gateway))]
    pub async fn submit_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
        amount: u64,
    ) -> Result<(), CheckoutError> {
        match self.step {
            CheckoutStep::Payment => {}
            CheckoutStep::Processing => return Err(CheckoutError::AlreadyProcessing),
            CheckoutStep::Complete => return Err(CheckoutError::AlreadyComplete),
            CheckoutStep::Address | CheckoutStep::Delivery => {
                return Err(CheckoutError::NotAtPayment);
            }
        }

        self.step = CheckoutStep::Processing;
        gateway.process(amount).await;
        self.step = CheckoutStep::Complete;
        info!(amount, "order complete");
        Ok(())
    }
}
