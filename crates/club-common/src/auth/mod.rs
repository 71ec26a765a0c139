//! Password hashing and session tokens

mod password;
mod session;

pub use password::{hash_password, validate_password_strength, verify_password, PasswordService};
pub use session::{SessionClaims, SessionService, SessionToken};
