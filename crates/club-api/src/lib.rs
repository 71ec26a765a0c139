//! # club-api
//!
//! HTTP server for the chess club built with the Axum framework.
//!
//! Pages are answered as a template name plus JSON context; guard denials
//! become redirects to the log-in page or the feed.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;
