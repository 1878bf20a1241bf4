/// Data models for the identity service
pub mod language;
pub mod user;

pub use language::Language;
pub use user::{RoleName, Status, User};
