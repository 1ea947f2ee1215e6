//! Integration tests for entity storage
//!
//! Tests slot reuse, generational indices, and persistent mids.

use serpentine_storage::EntityStore;

#[test]
fn slots_are_reused_with_new_generation() {
    let mut store = EntityStore::new();
    let (a, _) = store.spawn();
    store.destroy(a).unwrap();
    let (b, _) = store.spawn();

    assert_eq!(a.index, b.index);
    assert_ne!(a.generation, b.generation);
    assert!(!store.exists(a));
    assert!(store.exists(b));
}

#[test]
fn mids_are_never_reused() {
    let mut store = EntityStore::new();
    let (a, mid_a) = store.spawn();
    store.destroy(a).unwrap();
    let (b, mid_b) = store.spawn();

    assert_ne!(mid_a, mid_b);
    assert_eq!(store.by_mid(mid_a), None);
    assert_eq!(store.by_mid(mid_b), Some(b));
    assert_eq!(store.mid_of(b), Some(mid_b));
}

#[test]
fn double_destroy_is_an_error() {
    let mut store = EntityStore::new();
    let (a, _) = store.spawn();
    store.destroy(a).unwrap();
    assert!(store.destroy(a).is_err());
    assert!(store.is_empty());
}

#[test]
fn iteration_skips_dead_slots() {
    let mut store = EntityStore::new();
    let ids: Vec<_> = (0..5).map(|_| store.spawn().0).collect();
    store.destroy(ids[1]).unwrap();
    store.destroy(ids[3]).unwrap();

    let live: Vec<_> = store.iter().collect();
    assert_eq!(live, vec![ids[0], ids[2], ids[4]]);
    assert_eq!(store.len(), 3);
}
