//! End-to-end checkout scenarios across cart, session, and orchestrator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use verdantia_core::ProductId;
use verdantia_storefront::{CheckoutError, CheckoutStep, StorefrontSession};

use verdantia_integration_tests::{InstantGateway, MockAdvisor, init_tracing, sample_catalog};

fn session_with_counter() -> (StorefrontSession, Arc<AtomicUsize>) {
    init_tracing();
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);
    let session = StorefrontSession::new(
        Arc::new(sample_catalog()),
        Arc::new(MockAdvisor::replying("ok")),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (session, completions)
}

#[tokio::test]
async fn full_checkout_clears_cart_and_fires_callback_once() {
    let (mut session, completions) = session_with_counter();

    // Subtotal 1000: 2 x Aurora Headphones (250) + 1 x Fern Speaker (500).
    session.add_to_cart(&ProductId::new("p1"), 2, None, None);
    session.add_to_cart(&ProductId::new("p2"), 1, None, None);
    assert_eq!(session.cart().subtotal(), 1000);

    assert_eq!(session.begin_checkout(), CheckoutStep::Address);
    assert_eq!(session.checkout_next(), Ok(CheckoutStep::Delivery));
    assert_eq!(session.checkout_next(), Ok(CheckoutStep::Payment));
    assert_eq!(session.checkout_subtotal(), 1000);

    session
        .submit_payment(&InstantGateway)
        .await
        .expect("payment completes");

    assert_eq!(session.cart().item_count(), 0);
    assert_eq!(session.cart().subtotal(), 0);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert_eq!(session.checkout_step(), None);
}

#[tokio::test]
async fn advancement_is_not_gated_on_field_validation() {
    // The flow deliberately lets shoppers click through empty forms.
    let (mut session, _) = session_with_counter();
    session.add_to_cart(&ProductId::new("p3"), 1, None, None);

    session.begin_checkout();
    assert_eq!(session.checkout_next(), Ok(CheckoutStep::Delivery));
    assert_eq!(session.checkout_next(), Ok(CheckoutStep::Payment));

    session
        .submit_payment(&InstantGateway)
        .await
        .expect("no validation blocks payment");
}

#[tokio::test]
async fn submit_before_payment_step_is_rejected() {
    let (mut session, completions) = session_with_counter();
    session.add_to_cart(&ProductId::new("p1"), 1, None, None);
    session.begin_checkout();

    let result = session.submit_payment(&InstantGateway).await;

    assert_eq!(result, Err(CheckoutError::NotAtPayment));
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert_eq!(session.cart().item_count(), 1);
}

#[tokio::test]
async fn exit_to_shopping_keeps_cart_and_restarts_flow() {
    let (mut session, completions) = session_with_counter();
    session.add_to_cart(&ProductId::new("p2"), 2, None, None);

    session.begin_checkout();
    session.checkout_next().expect("to delivery");
    session.exit_checkout();

    assert_eq!(session.checkout_step(), None);
    assert_eq!(session.cart().item_count(), 2);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert_eq!(session.begin_checkout(), CheckoutStep::Address);
}

#[tokio::test]
async fn checkout_subtotal_tracks_concurrent_cart_mutation() {
    let (mut session, _) = session_with_counter();
    session.add_to_cart(&ProductId::new("p1"), 1, None, None);
    session.begin_checkout();
    assert_eq!(session.checkout_subtotal(), 250);

    session.cart_mut().update_quantity(&ProductId::new("p1"), 1);

    // Live view, not a snapshot taken at checkout entry.
    assert_eq!(session.checkout_subtotal(), 500);
}
