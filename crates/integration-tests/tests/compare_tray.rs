//! Comparison tray scenarios against the sample catalog.

use verdantia_core::ProductId;
use verdantia_storefront::{CompareError, CompareSet};

use verdantia_integration_tests::{init_tracing, sample_catalog};

#[test]
fn tray_fills_to_four_then_rejects_a_fifth() {
    init_tracing();
    let mut tray = CompareSet::new();

    for id in ["p1", "p2", "p3", "p3-jfy"] {
        tray.toggle(&ProductId::new(id)).expect("room available");
    }
    assert_eq!(tray.len(), 4);

    let result = tray.toggle(&ProductId::new("p4"));

    assert_eq!(result, Err(CompareError::LimitReached));
    assert_eq!(tray.len(), 4);
    let ids: Vec<_> = tray.ids().iter().map(ToString::to_string).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p3-jfy"]);
}

#[test]
fn spec_union_covers_every_compared_product() {
    let catalog = sample_catalog();
    let mut tray = CompareSet::new();
    tray.toggle(&ProductId::new("p1")).expect("room");
    tray.toggle(&ProductId::new("p2")).expect("room");
    tray.toggle(&ProductId::new("p4")).expect("room");

    let union = tray.spec_key_union(&catalog);

    // First appearance order: p1's keys, then p2's new key, then p4's.
    assert_eq!(union, vec!["Battery", "Weight", "Driver", "Channels"]);
}

#[test]
fn spec_union_recomputes_after_tray_changes() {
    let catalog = sample_catalog();
    let mut tray = CompareSet::new();
    tray.toggle(&ProductId::new("p2")).expect("room");
    tray.toggle(&ProductId::new("p4")).expect("room");
    assert_eq!(
        tray.spec_key_union(&catalog),
        vec!["Battery", "Driver", "Channels"]
    );

    tray.remove(&ProductId::new("p4"));
    assert_eq!(tray.spec_key_union(&catalog), vec!["Battery", "Driver"]);

    tray.clear();
    assert!(tray.spec_key_union(&catalog).is_empty());
}

#[test]
fn membership_drives_card_selection_state() {
    let mut tray = CompareSet::new();
    let id = ProductId::new("p1");

    assert!(!tray.contains(&id));
    tray.toggle(&id).expect("room");
    assert!(tray.contains(&id));
    tray.toggle(&id).expect("toggle off");
    assert!(!tray.contains(&id));
}
