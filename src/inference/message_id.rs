//! Message identity generation.
//!
//! Ids are a millisecond timestamp followed by a random base-36 suffix, e.g.
//! `1739912345678k3j9x0q2a`. Unique within a session with overwhelming
//! probability; nothing is promised across restarts.

use chrono::Utc;

/// Number of random base-36 characters appended after the timestamp.
const SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a new message id.
pub fn new_message_id() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{millis}{}", random_suffix())
}

/// Draws the suffix from the 122 random bits of a v4 UUID.
fn random_suffix() -> String {
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    suffix
}
