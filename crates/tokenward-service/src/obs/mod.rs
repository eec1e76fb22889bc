//! Lightweight in-process metrics (dependency-free).
//!
//! Revocation outcomes and latency are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::ServiceMetrics;
