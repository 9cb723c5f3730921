//! Room code generation.
//!
//! Room codes are 8-character strings using Crockford's Base32 alphabet,
//! short enough to read out loud and free of ambiguous glyphs.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const ROOM_CODE_LEN: usize = 8;

/// Generate a fresh room code from the thread-local CSPRNG.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    (0..ROOM_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Canonical (upper-case) form of a user-supplied code, or `None` when it
/// cannot be a room code.
pub fn normalize_room_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == ROOM_CODE_LEN && code.bytes().all(|b| CROCKFORD.contains(&b)) {
        Some(code)
    } else {
        None
    }
}
