//! Basic scenarios - single-threaded use of the public API

use atombloom::{estimate_false_positive_rate, estimate_parameters, BloomFilter};

#[test]
fn test_add_then_test() {
    let filter = BloomFilter::new(1000, 4);

    filter.add(b"alpha");

    assert!(filter.test(b"alpha"), "Should find the key we just added");
}

#[test]
fn test_absent_key_is_deterministic() {
    let first = BloomFilter::new(1000, 4);
    first.add(b"alpha");
    let answer = first.test(b"beta");

    // same hash, same answer, every run
    for _ in 0..10 {
        let filter = BloomFilter::new(1000, 4);
        filter.add(b"alpha");
        assert_eq!(filter.test(b"beta"), answer);
    }
}

#[test]
fn test_key_types() {
    let filter = BloomFilter::new(1000, 4);

    filter.add("str slice");
    filter.add(String::from("owned string"));
    filter.add(vec![1u8, 2, 3]);
    filter.add([9u8; 4]);

    assert!(filter.test(b"str slice"));
    assert!(filter.test("owned string"));
    assert!(filter.test([1u8, 2, 3]));
    assert!(filter.test(vec![9u8; 4]));
}

#[test]
fn test_empty_key() {
    let filter = BloomFilter::new(100, 3);
    assert!(!filter.test(b""));
    filter.add(b"");
    assert!(filter.test(b""));
}

#[test]
fn test_no_false_negatives() {
    let filter = BloomFilter::with_estimates(1000, 0.01);

    for i in 0..1000u32 {
        filter.add(i.to_be_bytes());
    }

    // All inserted items MUST be found
    for i in 0..1000u32 {
        assert!(filter.test(i.to_be_bytes()), "False negative for {}", i);
    }
}

#[test]
fn test_false_positive_rate_near_target() {
    let (m, k) = estimate_parameters(1000, 0.01);
    let filter = BloomFilter::new(m, k);

    for i in 0..1000u32 {
        filter.add(i.to_be_bytes());
    }

    let false_positives = (1001..101_001u32)
        .filter(|i| filter.test(i.to_be_bytes()))
        .count();

    // about 1000 expected
    assert!(
        (400..2000).contains(&false_positives),
        "got {} false positives",
        false_positives
    );
}

#[test]
fn test_empirical_estimate_matches_target() {
    let (m, k) = estimate_parameters(1000, 0.01);
    let rate = estimate_false_positive_rate(m, k, 1000);
    assert!(rate > 0.004 && rate < 0.02, "rate = {}", rate);
}

#[test]
fn test_test_and_add_reports_membership() {
    let filter = BloomFilter::new(1000, 4);

    assert!(!filter.test_and_add("alpha"));
    assert!(filter.test_and_add("alpha"));
    assert!(filter.test("alpha"));
}

#[test]
fn test_test_or_add_reports_membership() {
    let filter = BloomFilter::new(1000, 4);

    assert!(!filter.test_or_add("alpha"));
    assert!(filter.test_or_add("alpha"));
    assert!(filter.test("alpha"));
}

#[test]
fn test_merge_and_clear() {
    let a = BloomFilter::new(1000, 4);
    let b = BloomFilter::new(1000, 4);
    a.add("left");
    b.add("right");

    a.merge(&b).unwrap();
    assert!(a.test("left"));
    assert!(a.test("right"));
    assert_eq!(b.count_set_bits(), {
        let fresh = BloomFilter::new(1000, 4);
        fresh.add("right");
        fresh.count_set_bits()
    });

    a.clear_all();
    assert_eq!(a.count_set_bits(), 0);
    assert!(!a.test("left"));
}

#[test]
fn test_merge_rejects_mismatched_filters() {
    let a = BloomFilter::new(1000, 4);

    let err = a.merge(&BloomFilter::new(999, 4)).unwrap_err();
    assert!(err.to_string().contains("m's don't match"));

    let err = a.merge(&BloomFilter::new(1000, 5)).unwrap_err();
    assert!(err.to_string().contains("k's don't match"));
}

#[test]
fn test_copy_is_independent() {
    let original = BloomFilter::new(1000, 4);
    original.add("before");

    let copy = original.clone();
    assert_eq!(original, copy);

    copy.add("after");
    original.add("only in original");

    assert!(copy.test("before"));
    assert!(copy.test("after"));
    assert_ne!(original, copy);
}

#[test]
fn test_approximated_size_tracks_inserts() {
    let filter = BloomFilter::with_estimates(10_000, 0.01);
    assert_eq!(filter.approximated_size(), 0);

    for i in 0..5000u32 {
        filter.add(i.to_be_bytes());
    }

    let estimate = filter.approximated_size();
    assert!(
        (4750..=5250).contains(&estimate),
        "estimate {} too far from 5000",
        estimate
    );
}

#[test]
fn test_from_words_hydrates() {
    let source = BloomFilter::new(200, 3);
    source.add("alpha");

    let words = source.bit_set().to_words();
    let restored = BloomFilter::from_words(&words, 200, 3);

    assert_eq!(source, restored);
    assert!(restored.test("alpha"));
}
