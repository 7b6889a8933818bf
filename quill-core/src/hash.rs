//! Short url-safe identifiers for pastes.

use rand::RngCore;

const HASH_LENGTH: usize = 8;
const URL_SAFE_CHARS: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Generates an 8-character identifier drawn from a 64-character url-safe
/// alphabet, one character per random byte.
pub fn generate_hash_id() -> String {
    let mut bytes = [0u8; HASH_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);

    bytes
        .iter()
        .map(|byte| URL_SAFE_CHARS[(byte & 63) as usize] as char)
        .collect()
}
