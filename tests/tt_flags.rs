use fourk::board::Move;
use fourk::search::tt::{Bound, Tt};

#[test]
fn colliding_slot_is_replaced() {
    let mut tt = Tt::with_capacity_entries(1024);
    let key = 77u64;
    let alias = key + 1024;
    tt.store(key, Some(Move::new(12, 28, None, None)), 10, 6, Bound::Exact);
    tt.store(alias, None, -3, 1, Bound::Lower);
    assert!(tt.probe(key).is_none(), "always-replace slot kept the old entry");
    let e = tt.probe(alias).expect("new entry");
    assert_eq!(e.score, -3);
    assert_eq!(e.depth, 1);
    assert_eq!(e.bound, Bound::Lower);
}

#[test]
fn shallower_store_overwrites_deeper() {
    let mut tt = Tt::with_capacity_entries(64);
    tt.store(5, None, 100, 9, Bound::Exact);
    tt.store(5, None, 20, 1, Bound::Upper);
    let e = tt.probe(5).expect("entry");
    assert_eq!((e.score, e.depth, e.bound), (20, 1, Bound::Upper));
}

#[test]
fn scores_and_depths_are_clamped() {
    let mut tt = Tt::with_capacity_entries(64);
    tt.store(3, None, 1_000_000, 1_000, Bound::Lower);
    let e = tt.probe(3).expect("entry");
    assert_eq!(e.score, i16::MAX);
    assert_eq!(e.depth, i8::MAX);
}

#[test]
fn clear_forgets_entries() {
    let mut tt = Tt::with_capacity_entries(64);
    tt.store(64 * 3 + 1, None, 5, 2, Bound::Exact);
    tt.clear();
    assert!(tt.probe(64 * 3 + 1).is_none());
    // An empty slot still answers keys whose tag is zero.
    assert_eq!(tt.probe(1).map(|e| e.bound), Some(Bound::Upper));
}

#[test]
fn megabyte_sizing() {
    let tt = Tt::with_capacity_mb(1);
    assert_eq!(tt.capacity(), 1024 * 1024 / std::mem::size_of::<fourk::search::tt::Entry>());
}
