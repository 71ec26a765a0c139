//! Model to entity mappers
//!
//! Rows are converted with `TryFrom` because stored codes (role tags,
//! experience levels) are validated on the way out.

mod club;
mod club_role;
mod user;

pub use club_role::parse_role;
