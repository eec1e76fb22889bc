//! Top-level facade crate for tokenward.
//!
//! Re-exports the domain types and the revocation service so users can depend on a single crate.

pub mod core {
    pub use tokenward_core::*;
}

pub mod service {
    pub use tokenward_service::*;
}
