use super::*;

#[test]
fn test_sequential_alloc() {
    let mut ids = SlotAllocator::new();
    assert_eq!(ids.alloc(), Some(0));
    assert_eq!(ids.alloc(), Some(1));
    assert_eq!(ids.alloc(), Some(2));
    assert_eq!(ids.len(), 3);
    assert_eq!(ids.high_water_mark(), 3);
}

#[test]
fn test_free_recycles_last_freed_first() {
    let mut ids = SlotAllocator::new();
    let a = ids.alloc().unwrap();
    let _b = ids.alloc().unwrap();
    let c = ids.alloc().unwrap();
    assert!(ids.free(a));
    assert!(ids.free(c));

    assert_eq!(ids.alloc(), Some(c));
    assert_eq!(ids.alloc(), Some(a));
    assert_eq!(ids.alloc(), Some(3));
}

#[test]
fn test_free_unknown_id_is_rejected() {
    let mut ids = SlotAllocator::new();
    assert!(!ids.free(0));
    ids.alloc();
    assert!(!ids.free(5));
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_is_empty_after_all_freed() {
    let mut ids = SlotAllocator::default();
    assert!(ids.is_empty());
    let id = ids.alloc().unwrap();
    assert!(!ids.is_empty());
    ids.free(id);
    assert!(ids.is_empty());
    // High water mark never shrinks
    assert_eq!(ids.high_water_mark(), 1);
}
