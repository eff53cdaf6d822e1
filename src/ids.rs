// src/ids.rs

use alloy_primitives::keccak256;
use uuid::Uuid;

/// Identifier for a subscription that has never been saved: keccak-256 over
/// a fresh random UUID, `0x`-prefixed lowercase hex. The same value is used
/// on-chain, so it must fit a `bytes32`.
pub fn new_subscription_id() -> String {
    subscription_id_from_seed(&Uuid::new_v4().to_string())
}

pub fn subscription_id_from_seed(seed: &str) -> String {
    let hash = keccak256(seed.as_bytes());
    format!("0x{}", hex::encode(hash.as_slice()))
}

pub fn is_subscription_id(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .map(|rest| rest.len() == 64 && rest.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_prefixed_hashes() {
        let id = new_subscription_id();
        assert!(is_subscription_id(&id), "{id}");
        assert_ne!(id, new_subscription_id());
    }

    #[test]
    fn hash_of_known_seed() {
        // keccak256("") is a well-known constant
        assert_eq!(
            subscription_id_from_seed(""),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_subscription_id("abc"));
        assert!(!is_subscription_id("0x1234"));
    }
}
