//! Advice provider seam for the shopping copilot.
//!
//! The copilot never talks to a model API directly; it calls whatever
//! [`AdviceProvider`] was injected at session construction. Production wires
//! in [`AdvisorClient`] (Anthropic Messages API); tests inject mocks.

mod client;
mod error;
mod types;

use async_trait::async_trait;

use verdantia_core::Product;

pub use client::AdvisorClient;
pub use error::{AdviceError, ApiErrorResponse};
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message};

/// Catalog and cart context handed to the provider with every query.
#[derive(Debug, Clone, Default)]
pub struct AdviceContext {
    /// The full catalog, in display order.
    pub products: Vec<Product>,
    /// Products currently in the shopper's cart.
    pub cart: Vec<Product>,
}

/// External advice function backing the copilot.
///
/// Implementations may be slow and may fail; the copilot converts every
/// failure into its fixed fallback reply, so providers should just report
/// errors honestly.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Answer a shopper's question given the catalog and cart context.
    async fn advise(&self, query: &str, context: &AdviceContext) -> Result<String, AdviceError>;
}
