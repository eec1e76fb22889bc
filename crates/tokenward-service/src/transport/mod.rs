//! Transport layer (HTTP/JSON).
//!
//! Binds the revocation workflow to a route and maps failures onto the
//! uniform remote-call error body.

pub mod http;

pub use http::ApiError;
