//! Password hashing.
//!
//! Encoded form: `pbkdf2-sha256$<iterations>$<salt_b64>$<hash_b64>`, where
//! the hash is 32 bytes of PBKDF2-HMAC-SHA256. The iteration count travels
//! with the hash, so changing the configured count only affects new hashes.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use tracing::warn;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let iterations = iterations.max(1);
    let digest = derive(password.as_bytes(), &salt, iterations);
    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD.encode(salt),
        STANDARD.encode(digest)
    )
}

/// Check `password` against an encoded hash. Malformed hashes never match.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Some((iterations, salt, expected)) = parse(encoded) else {
        warn!("stored password hash is malformed");
        return false;
    };
    let actual = derive(password.as_bytes(), &salt, iterations);
    constant_time_eq(&actual, &expected)
}

/// A short fingerprint of an encoded hash. Session tokens carry it so that
/// replacing the password invalidates tokens issued before the change.
pub fn password_version(encoded: &str) -> String {
    let digest = Sha256::digest(encoded.as_bytes());
    URL_SAFE_NO_PAD.encode(&digest[..8])
}

/// Compare two byte slices in constant time (for equal lengths).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, HASH_LEN>(password, salt, iterations)
}

fn parse(encoded: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = encoded.split('$');
    let (scheme, iterations, salt, hash) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    if scheme != SCHEME || parts.next().is_some() {
        return None;
    }
    let iterations: u32 = iterations.parse().ok().filter(|n| *n > 0)?;
    let salt = STANDARD.decode(salt).ok()?;
    let hash = STANDARD.decode(hash).ok()?;
    Some((iterations, salt, hash))
}
