//! Route handlers
//!
//! All HTTP request handlers organized by page.

pub mod applicants;
pub mod auth;
pub mod clubs;
pub mod health;
pub mod members;
pub mod pages;
pub mod users;
