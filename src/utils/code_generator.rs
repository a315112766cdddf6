//! Short id and opaque token generation.
//!
//! Short ids are URL-safe base64 of random bytes. Tokens are drawn from an
//! alphabet without look-alike characters so they survive being read aloud
//! or copied by hand.

use base64::Engine as _;
use rand::Rng;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 6;

/// Length of generated short ids.
pub const CODE_LENGTH: usize = 8;

/// Length of generated API tokens.
pub const TOKEN_LENGTH: usize = 24;

/// Token alphabet: ASCII letters and digits minus `0 O 1 l I`.
const TOKEN_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Ids that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &[
    "register",
    "renew-token",
    "shorten",
    "links",
    "edit",
    "delete",
    "stats",
    "health",
];

/// Generates a cryptographically secure random short id.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character id.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Returns true if `code` collides with a route segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Generates a random opaque API token.
///
/// Draws [`TOKEN_LENGTH`] characters from the thread-local CSPRNG.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
