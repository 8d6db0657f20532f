//! Complaint identifier generation.
//!
//! Identifiers look like `PEA-1768465800000-k3x9q`: the creation time in
//! unix milliseconds followed by a short random token. There is no central
//! counter, so the token is what keeps bursts of creates within the same
//! millisecond apart; the repository additionally rejects a token already
//! present in the collection.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const ID_PREFIX: &str = "PEA";

const TOKEN_LEN: usize = 5;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a candidate identifier for a complaint created at `at`.
pub fn generate(at: DateTime<Utc>) -> String {
    format!("{}-{}-{}", ID_PREFIX, at.timestamp_millis(), random_token())
}

/// Identifier with a full 128-bit random suffix, used once short tokens
/// keep colliding.
pub fn generate_wide(at: DateTime<Utc>) -> String {
    format!("{}-{}-{}", ID_PREFIX, at.timestamp_millis(), Uuid::new_v4().simple())
}

fn random_token() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        token.push(ALPHABET[(bits % 36) as usize] as char);
        bits /= 36;
    }
    token
}
