/// Security primitives for the identity core:
/// - password policy and salted-credential hashing
/// - signed session tokens (RS256)
pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenIssuer, TOKEN_ISSUER, TOKEN_VALIDITY_DAYS};
pub use password::{generate_salt, is_acceptable_password, salted_hash};
