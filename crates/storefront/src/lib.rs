//! Verdantia Storefront session engine.
//!
//! This crate holds the in-memory state for one shopper session: the cart,
//! the product-comparison tray, the checkout flow, and the chat-style
//! shopping copilot. Rendering, routing, and persistence live elsewhere;
//! everything here is plain state plus two asynchronous boundaries (the
//! copilot's advice call and the simulated payment step).
//!
//! # Modules
//!
//! - [`catalog`] - Read-only product collection supplied at startup
//! - [`cart`] - Cart line bookkeeping and totals
//! - [`compare`] - Bounded side-by-side comparison tray
//! - [`checkout`] - Linear address/delivery/payment state machine
//! - [`copilot`] - Chat log with a single-in-flight advice request gate
//! - [`advisor`] - Advice provider seam plus the production HTTP client
//! - [`session`] - Facade wiring the stores together for one session
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod advisor;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compare;
pub mod config;
pub mod copilot;
pub mod session;

pub use advisor::{AdviceContext, AdviceError, AdviceProvider, AdvisorClient};
pub use cart::{CartLine, CartStore};
pub use catalog::Catalog;
pub use checkout::{
    CheckoutError, CheckoutOrchestrator, CheckoutStep, PaymentGateway, SimulatedGateway,
};
pub use compare::{COMPARE_LIMIT, CompareError, CompareSet, ToggleOutcome, union_of_spec_keys};
pub use config::{ConfigError, CopilotConfig, StorefrontConfig};
pub use copilot::{ChatMessage, CopilotError, CopilotSession, FALLBACK_REPLY};
pub use session::{CompletionCallback, StorefrontSession};
