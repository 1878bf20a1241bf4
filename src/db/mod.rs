/// Directory collaborators for the identity service
pub mod users;

pub use users::{CreateUser, InMemoryUserDirectory, UserDirectory, UserFilter};
