//! tokenward core: domain types and the shared error surface.
//!
//! This crate defines the access-token entity, the revocation request/result
//! value objects, the deletion event, and the error taxonomy shared by the
//! service and its callers. It carries no runtime or transport dependencies so
//! it can be reused by clients and alternative collaborator backends.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths must surface as `RevokeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{ClientCode, Result, RevokeError, RpcFailure};
pub use model::{AccessToken, RevocationRequest, RevocationResult, TokenDeletedEvent};
