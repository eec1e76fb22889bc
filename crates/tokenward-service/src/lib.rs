//! tokenward service library entry.
//!
//! This crate wires the collaborator seams (token store, policy engine, event
//! sink), the revocation workflow, config, metrics, and the HTTP binding into
//! one service. It is consumed by the binary (`main.rs`) and by integration
//! tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod events;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod store;
pub mod transport;
pub mod workflow;

pub use workflow::RevocationWorkflow;
