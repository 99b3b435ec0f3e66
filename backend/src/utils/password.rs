//! Salted password digests. The schema keeps hash and salt in separate
//! columns; the digest is sha256 over the password followed by the
//! hex-encoded salt.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Fresh random salt, hex encoded.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn hash_password(password: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt_hex.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, salt_hex: &str, expected_hash: &str) -> bool {
    hash_password(password, salt_hex) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let salt = generate_salt();
        let hash = hash_password("S3cr3t!", &salt);
        assert!(verify_password("S3cr3t!", &salt, &hash));
        assert!(!verify_password("wrong", &salt, &hash));
    }

    #[test]
    fn same_password_different_salt_differs() {
        let a = generate_salt();
        let b = generate_salt();
        assert_ne!(a, b);
        assert_ne!(hash_password("pw", &a), hash_password("pw", &b));
    }

    #[test]
    fn salt_is_fixed_length_hex() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
