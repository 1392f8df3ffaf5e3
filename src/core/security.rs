//! PIN hashing and resolution.
//!
//! PINs are stored as Argon2id PHC strings with a fresh random salt per
//! hash. Verification runs the full key derivation and compares in
//! constant time, so a near-miss PIN costs exactly as much as a miss.

use crate::errors::{AppError, AppResult};
use crate::models::Employee;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// PINs are short numeric strings; the exact length is not fixed, only
/// bounded.
pub const MAX_PIN_LENGTH: usize = 12;

/// True iff the submitted string is a plausible PIN: non-empty ASCII
/// digits within the length bound. Anything else is rejected before any
/// hash work.
pub fn is_valid_pin(pin: &str) -> bool {
    !pin.is_empty() && pin.len() <= MAX_PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

/// Hash a PIN for storage. Each call salts independently, so equal PINs
/// produce different hashes.
pub fn make_pin_hash(pin: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| AppError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a submitted PIN against a stored PHC string. An unparsable
/// stored hash verifies as false rather than erroring: a corrupted row
/// must never grant access.
pub fn verify_pin(pin: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(pin.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Map a submitted PIN to an active employee. Inactive employees never
/// match. Returns the first active employee whose stored hash verifies.
pub fn resolve_pin(conn: &rusqlite::Connection, pin: &str) -> AppResult<Option<Employee>> {
    let candidates = crate::db::employees::list_employees(conn, true)?;
    for emp in candidates {
        if verify_pin(pin, &emp.pin_hash) {
            return Ok(Some(emp));
        }
    }
    Ok(None)
}
