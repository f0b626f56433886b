//! Salted password hashing.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash a password with a fresh random salt.
///
/// Stored as `salt$digest`, both lowercase hex.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    encode(&salt, password)
}

/// Check a submitted password against a stored `salt$digest` hash.
///
/// A stored value that does not parse verifies as false rather than erroring.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, _digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Some(salt) = decode_hex(salt_hex) else {
        return false;
    };
    encode(&salt, password) == stored
}

fn encode(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    format!("{}${}", to_hex(salt), to_hex(&digest))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
