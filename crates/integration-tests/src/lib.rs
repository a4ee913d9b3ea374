//! Shared fixtures for Verdantia integration tests.
//!
//! Provides a small sample catalog, an instant payment gateway, and mock
//! advice providers so scenario tests never sleep or touch the network.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use verdantia_core::{CarbonFootprint, CurrencyCode, Price, Product, ProductId};
use verdantia_storefront::advisor::{AdviceContext, AdviceError, AdviceProvider};
use verdantia_storefront::{Catalog, PaymentGateway};

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process.
///
/// Respects `RUST_LOG`; silent by default.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build one sample product.
#[must_use]
pub fn product(id: &str, name: &str, price: u64, specs: &[(&str, &str)]) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price, CurrencyCode::USD),
        category: "audio".to_string(),
        description: format!("{name} description"),
        images: vec![format!("{id}-hero.webp")],
        specs: specs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<BTreeMap<_, _>>(),
        rating: 4.4,
        review_count: 120,
        ar_capable: false,
        stock: 12,
        carbon_footprint: CarbonFootprint::Low,
    }
}

/// A five-product sample catalog.
///
/// Includes a suffixed duplicate of `p3` mirroring the "Just For You" grid,
/// which re-renders products under a synthesized id.
#[must_use]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product(
            "p1",
            "Aurora Headphones",
            250,
            &[("Battery", "30h"), ("Weight", "250g")],
        ),
        product(
            "p2",
            "Fern Speaker",
            500,
            &[("Battery", "12h"), ("Driver", "40mm")],
        ),
        product("p3", "Moss Earbuds", 120, &[("Battery", "8h")]),
        product("p3-jfy", "Moss Earbuds", 120, &[("Battery", "8h")]),
        product("p4", "Lichen Soundbar", 800, &[("Channels", "5.1")]),
    ])
}

/// Payment gateway that resolves immediately.
pub struct InstantGateway;

#[async_trait]
impl PaymentGateway for InstantGateway {
    async fn process(&self, _amount: u64) {}
}

/// Advice provider returning a canned reply and counting calls.
pub struct MockAdvisor {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockAdvisor {
    /// Provider that always succeeds with `reply`.
    #[must_use]
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `advise` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceProvider for MockAdvisor {
    async fn advise(&self, _query: &str, _context: &AdviceContext) -> Result<String, AdviceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AdviceError::Api {
                error_type: "overloaded_error".to_string(),
                message: "try again later".to_string(),
            });
        }
        Ok(self.reply.clone())
    }
}
