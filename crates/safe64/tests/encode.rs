//! Tests for safe-alphabet encoding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use safe64::{encode_into, encoded_len, to_safe64};

fn generate_blob() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let length = rng.gen_range(0..=100);
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn matches_reference_engine() {
    for _ in 0..100 {
        let blob = generate_blob();
        assert_eq!(
            to_safe64(&blob),
            URL_SAFE_NO_PAD.encode(&blob),
            "failed for blob of length {}",
            blob.len()
        );
    }
}

#[test]
fn output_stays_in_safe_alphabet() {
    for _ in 0..100 {
        let blob = generate_blob();
        let encoded = to_safe64(&blob);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
        assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }
}

#[test]
fn length_law() {
    for len in 0..=100 {
        let blob = vec![0xA5u8; len];
        let encoded = to_safe64(&blob);
        assert_eq!(encoded.len(), encoded_len(len));
        assert_eq!(encoded.len(), (len * 8).div_ceil(6));
    }
}

#[test]
fn empty_input() {
    assert_eq!(to_safe64(b""), "");
}

#[test]
fn single_zero_byte() {
    assert_eq!(to_safe64(&[0x00]), "AA");
}

#[test]
fn three_zero_bytes() {
    assert_eq!(to_safe64(&[0x00, 0x00, 0x00]), "AAAA");
}

#[test]
fn single_byte() {
    assert_eq!(to_safe64(b"f"), "Zg");
}

#[test]
fn two_bytes() {
    assert_eq!(to_safe64(b"fo"), "Zm8");
}

#[test]
fn three_bytes() {
    assert_eq!(to_safe64(b"foo"), "Zm9v");
}

#[test]
fn classic_unpadded_vector() {
    assert_eq!(to_safe64(b"any carnal pleas"), "YW55IGNhcm5hbCBwbGVhcw");
}

#[test]
fn substituted_characters_appear() {
    // 0xFB 0xFF packs to sextets 62, 63, 60.
    assert_eq!(to_safe64(&[0xFB, 0xFF]), "-_8");
}

#[test]
fn encode_into_reports_written_length() {
    let blob = b"hello world";
    let mut dst = vec![0u8; 64];
    let written = encode_into(blob, &mut dst);
    assert_eq!(written, encoded_len(blob.len()));
    assert_eq!(&dst[..written], b"aGVsbG8gd29ybGQ");
}
