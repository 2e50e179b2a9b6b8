use error_relay::{allocate_next, ErrorId, ExecContext};
use std::collections::HashSet;
use std::thread;

#[test]
fn sequences_strictly_increase_within_a_thread() {
    let a = allocate_next();
    let b = allocate_next();
    let c = allocate_next();

    assert!(a.sequence() < b.sequence());
    assert!(b.sequence() < c.sequence());
}

#[test]
fn every_allocation_carries_the_reserved_tag() {
    for _ in 0..100 {
        let id = allocate_next();
        assert!(!id.is_none());
        assert_eq!(id.tag(), ErrorId::RESERVED_TAG);
    }
}

#[test]
fn concurrent_allocation_yields_distinct_identifiers() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| (0..200).map(|_| allocate_next()).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "identifier {id} allocated twice");
        }
    }
    assert_eq!(seen.len(), 8 * 200);
}

#[test]
fn new_error_is_non_zero_and_becomes_current() {
    let cx = ExecContext::new();
    assert!(cx.current_error().is_none());

    let id = cx.new_error();
    assert!(!id.is_none());
    assert_eq!(cx.current_error(), id);
}

#[test]
fn set_current_overwrites_the_ambient_identifier() {
    let cx = ExecContext::new();
    let first = cx.new_error();
    let second = cx.new_error();
    assert_eq!(cx.current_error(), second);

    cx.set_current(first);
    assert_eq!(cx.current_error(), first);
}

#[test]
fn separate_contexts_track_current_independently() {
    let cx_a = ExecContext::new();
    let cx_b = ExecContext::new();

    let id_a = cx_a.new_error();
    assert_eq!(cx_a.current_error(), id_a);
    assert!(cx_b.current_error().is_none());
}

#[test]
fn identifiers_order_by_raw_value() {
    let a = allocate_next();
    let b = allocate_next();
    assert!(a < b);
    assert_ne!(a, b);
    assert!(ErrorId::NONE < a);
}
