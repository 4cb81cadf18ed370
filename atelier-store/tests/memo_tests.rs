use atelier_store::{Memo, MemoStats};
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn same_key_hits() {
    let calls = Cell::new(0);
    let mut memo = Memo::new();
    let a = memo.get_or_compute(1u64, || {
        calls.set(calls.get() + 1);
        "value".to_string()
    });
    let b = memo.get_or_compute(1u64, || {
        calls.set(calls.get() + 1);
        "other".to_string()
    });
    assert_eq!(calls.get(), 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 1 });
}

#[test]
fn new_key_recomputes() {
    let mut memo = Memo::new();
    let a = memo.get_or_compute((1u64, "s1"), || 10);
    let b = memo.get_or_compute((2u64, "s1"), || 20);
    assert_eq!((*a, *b), (10, 20));
    assert_eq!(memo.stats().misses, 2);
}

#[test]
fn errors_are_not_cached() {
    let mut memo: Memo<u64, i32> = Memo::new();
    let err: Result<_, &str> = memo.get_or_try_compute(1, || Err("boom"));
    assert!(err.is_err());
    let ok: Result<_, &str> = memo.get_or_try_compute(1, || Ok(5));
    assert_eq!(*ok.unwrap(), 5);
}

#[test]
fn invalidate_forces_recompute() {
    let mut memo = Memo::new();
    memo.get_or_compute(1u8, || 1);
    memo.invalidate();
    let v = memo.get_or_compute(1u8, || 2);
    assert_eq!(*v, 2);
}
