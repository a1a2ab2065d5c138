//! Random code generation

use rand::Rng;

use crate::constants::INVITE_CODE_LENGTH;

/// Unambiguous uppercase alphabet (no 0/O, 1/I)
const INVITE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a random token from `charset`
pub fn generate_token(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// Generate a league invite code
pub fn generate_invite_code() -> String {
    generate_token(INVITE_CHARSET, INVITE_CODE_LENGTH)
}
