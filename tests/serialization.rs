//! Binary and serde round-trips across encodings

use atombloom::{AtomicBitSet, BloomFilter};

fn populated(m: usize, k: usize, keys: u32) -> BloomFilter {
    let filter = BloomFilter::new(m, k);
    for i in 0..keys {
        filter.add(format!("key-{}", i));
    }
    filter
}

#[test]
fn test_binary_roundtrip_preserves_membership() {
    let filter = populated(10_000, 7, 1000);

    let mut buf = Vec::new();
    let written = filter.write_to(&mut buf).unwrap();
    assert_eq!(written as usize, buf.len());

    let restored = BloomFilter::read_from(&mut buf.as_slice()).unwrap();
    assert_eq!(filter, restored);
    assert_eq!(restored.size(), 10_000);
    assert_eq!(restored.hash_count(), 7);
    for i in 0..1000 {
        assert!(restored.test(format!("key-{}", i)));
    }
}

#[test]
fn test_binary_roundtrip_minimal_and_empty() {
    for filter in [BloomFilter::new(1, 1), populated(1, 1, 1), BloomFilter::new(64, 3)] {
        let restored = BloomFilter::from_bytes(&filter.to_bytes()).unwrap();
        assert_eq!(filter, restored);
    }
}

#[test]
fn test_binary_wire_layout() {
    let filter = BloomFilter::new(100, 2);
    let bytes = filter.to_bytes();

    assert_eq!(&bytes[0..8], &100u64.to_be_bytes());
    assert_eq!(&bytes[8..16], &2u64.to_be_bytes());
    assert_eq!(&bytes[16..24], &100u64.to_be_bytes());
    assert_eq!(&bytes[24..32], &2u64.to_be_bytes());
    assert_eq!(bytes.len(), 32 + 2 * 8);
}

#[test]
fn test_binary_decode_errors_are_serialization_errors() {
    let bytes = populated(500, 3, 10).to_bytes();

    let truncated = BloomFilter::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(truncated.is_serialization());

    let mut corrupt = bytes.clone();
    corrupt[31] = 99; // word count
    assert!(BloomFilter::from_bytes(&corrupt).unwrap_err().is_serialization());
}

#[test]
fn test_binary_rejects_huge_declared_size() {
    let header: Vec<u8> = [u64::MAX, 3, u64::MAX, 0]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();

    assert!(BloomFilter::from_bytes(&header).is_err());
    assert!(AtomicBitSet::read_from(&mut &header[16..]).is_err());

    // a filter that does decode stays usable
    let ok = BloomFilter::from_bytes(&BloomFilter::new(64, 3).to_bytes()).unwrap();
    ok.add("alpha");
    assert!(ok.test("alpha"));
}

#[test]
fn test_bitset_binary_roundtrip() {
    let bits = AtomicBitSet::new(300);
    for i in [0, 1, 63, 64, 199, 299] {
        bits.set(i);
    }

    let mut buf = Vec::new();
    bits.write_to(&mut buf).unwrap();
    let restored = AtomicBitSet::read_from(&mut buf.as_slice()).unwrap();

    assert_eq!(bits, restored);
    assert_eq!(restored.count(), 6);
}

#[cfg(feature = "serde")]
mod serde_formats {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let filter = populated(2048, 5, 200);

        let json = serde_json::to_string(&filter).unwrap();
        let restored: BloomFilter = serde_json::from_str(&json).unwrap();

        assert_eq!(filter, restored);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(BloomFilter::new(64, 1)).unwrap();

        assert_eq!(json["m"], 64);
        assert_eq!(json["k"], 1);
        assert_eq!(json["b"]["size"], 64);
        assert_eq!(json["b"]["data"], serde_json::json!([0]));
    }

    #[test]
    fn test_json_and_binary_agree() {
        let filter = populated(777, 4, 50);

        let json = serde_json::to_string(&filter).unwrap();
        let from_json: BloomFilter = serde_json::from_str(&json).unwrap();

        let from_binary = BloomFilter::from_bytes(&filter.to_bytes()).unwrap();

        assert_eq!(from_json, from_binary);
        assert_eq!(from_json.to_bytes(), filter.to_bytes());
    }

    #[test]
    fn test_json_rejects_malformed() {
        let cases = [
            r#"{"m":64,"k":1,"b":{"size":64,"data":[1.5]}}"#,
            r#"{"m":64,"k":1,"b":{"size":64,"data":[]}}"#,
            r#"{"m":64,"k":1,"b":{"size":65,"data":[0,0]}}"#,
            r#"{"m":-1,"k":1,"b":{"size":64,"data":[0]}}"#,
            r#"{"m":64,"k":1,"b":null}"#,
            r#"[64,1]"#,
        ];

        for case in cases {
            let result: Result<BloomFilter, _> = serde_json::from_str(case);
            assert!(result.is_err(), "accepted {}", case);
        }
    }

    #[test]
    fn test_json_rejects_huge_declared_size() {
        let result: Result<AtomicBitSet, _> =
            serde_json::from_str(r#"{"size":18446744073709551615,"data":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bincode_roundtrip() {
        let filter = populated(4096, 6, 300);

        let bytes = bincode::serialize(&filter).unwrap();
        let restored: BloomFilter = bincode::deserialize(&bytes).unwrap();

        assert_eq!(filter, restored);
    }

    #[test]
    fn test_bitset_json_roundtrip() {
        let bits = AtomicBitSet::new(130);
        bits.set(129);

        let json = serde_json::to_string(&bits).unwrap();
        let restored: AtomicBitSet = serde_json::from_str(&json).unwrap();

        assert_eq!(bits, restored);
        assert!(restored.test(129));
    }
}
