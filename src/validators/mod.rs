/// Input validation for the identity service
pub mod login;
pub mod users;
