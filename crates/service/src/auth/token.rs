//! Bearer token format: `<row id>|<40 alphanumeric chars>`.
//!
//! Only the SHA-256 hex digest of the secret part is persisted.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

pub const SECRET_LEN: usize = 40;

pub fn generate_secret() -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(SECRET_LEN).map(char::from).collect()
}

pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

pub fn plain_text(id: i32, secret: &str) -> String {
    format!("{id}|{secret}")
}

/// Split a presented token into `(id, secret)`.
///
/// A token without `|` is accepted as a bare secret and yields `None` for
/// the id. Anything else malformed yields `None` overall.
pub fn parse(presented: &str) -> Option<(Option<i32>, &str)> {
    let presented = presented.trim();
    let (id, secret) = match presented.split_once('|') {
        Some((id, secret)) => (Some(id.parse::<i32>().ok()?), secret),
        None => (None, presented),
    };
    if secret.is_empty() {
        return None;
    }
    Some((id, secret))
}
