//! Session key generation.

use rand::{rngs::OsRng, RngCore};

const SESSION_KEY_LEN: usize = 16;

/// High-entropy opaque bearer token: 16 random bytes, hex encoded.
pub fn generate_session_key() -> String {
    let mut bytes = [0u8; SESSION_KEY_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
