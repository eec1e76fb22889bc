//! Domain model for access-token revocation.
//!
//! - `AccessToken`: the stored entity, forwarded opaquely beyond `id`/`token`.
//! - `RevocationRequest` / `RevocationResult`: workflow input and output.
//! - `TokenDeletedEvent`: notification published after a successful delete.

pub mod event;
pub mod revocation;
pub mod token;

pub use event::TokenDeletedEvent;
pub use revocation::{RevocationRequest, RevocationResult};
pub use token::AccessToken;
