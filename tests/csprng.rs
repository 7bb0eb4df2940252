use randomizer::{CsprngProvider, EntropyProvider};

#[test]
fn seeded_provider_is_reproducible() {
    let a = CsprngProvider::from_seed([0x42u8; 32]);
    let b = CsprngProvider::from_seed([0x42u8; 32]);

    assert_eq!(a.random_bytes(128).unwrap(), b.random_bytes(128).unwrap());
    assert_eq!(a.random_bytes(3).unwrap(), b.random_bytes(3).unwrap());
}

#[test]
fn successive_requests_differ() {
    let provider = CsprngProvider::from_seed([0xAAu8; 32]);

    let a = provider.random_bytes(64).unwrap();
    let b = provider.random_bytes(64).unwrap();

    assert_ne!(a, b);
}

#[test]
fn zero_seed_matches_rfc8439_keystream() {
    // RFC 8439 A.1, test vector #1: all-zero key and nonce, counter 0.
    let provider = CsprngProvider::from_seed([0u8; 32]);

    assert_eq!(
        provider.random_bytes(16).unwrap(),
        [
            0x76, 0xb8, 0xe0, 0xad, 0xa0, 0xf1, 0x3d, 0x90, 0x40, 0x5d, 0x6a, 0xe5, 0x53, 0x86,
            0xbd, 0x28,
        ]
    );
}

#[test]
fn seeds_from_os_on_first_use() {
    let provider = CsprngProvider::new();
    let out = provider.random_bytes(32).unwrap();

    assert!(out.iter().any(|&b| b != 0));
}

#[test]
fn returns_requested_length() {
    let provider = CsprngProvider::new();

    for count in [0, 1, 2, 8, 63, 64, 65, 200] {
        assert_eq!(provider.random_bytes(count).unwrap().len(), count);
    }
}
