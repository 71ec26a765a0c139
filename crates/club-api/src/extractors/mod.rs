//! Axum extractors for request handling
//!
//! Custom extractors for the session caller, path parameters, and form bodies.

mod caller;
mod form;
mod path;

pub use caller::{clear_session_cookie, set_session_cookie, CurrentCaller, SESSION_COOKIE};
pub use form::HtmlForm;
pub use path::{ClubPath, ClubUserPath};
