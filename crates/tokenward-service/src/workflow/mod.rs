//! Command workflows exposed by the service.

pub mod revoke;

pub use revoke::RevocationWorkflow;
