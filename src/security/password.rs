/// Password rules and salted-credential primitives.
///
/// The stored credential is `sha256(salt || password)` hex-encoded, with the
/// salt kept next to the hash on the user record. Login never compares raw
/// passwords, only recomputed hashes.
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 32;

const SALT_LENGTH_BYTES: usize = 16;

/// Simple password rule enforcing:
/// 1) 6 or more characters
/// 2) 32 or less characters
/// 3) not composed entirely of whitespace
/// 4) when `only_alphanumeric` is set, only letters, digits and spaces
pub fn is_acceptable_password(password: &str, only_alphanumeric: bool) -> bool {
    let length = password.chars().count();

    if password.trim().is_empty() || length < PASSWORD_MIN_LENGTH || length > PASSWORD_MAX_LENGTH {
        return false;
    }

    if password.chars().all(|c| c == ' ') {
        return false;
    }

    if only_alphanumeric
        && !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        return false;
    }

    true
}

/// Fresh unpredictable salt, hex-encoded.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LENGTH_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Deterministic salted hash: same salt and password always produce the
/// same output.
pub fn salted_hash(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
