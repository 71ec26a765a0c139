//! Integration test utilities for the chess club server
//!
//! This crate provides helpers for running end-to-end tests against the
//! page routes of a server backed by the in-memory store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
