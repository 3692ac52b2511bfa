//! pirepe library crate — re-exports for integration tests.
//!
//! The primary interface is the `pirepe` binary. This lib.rs exposes internal
//! modules so that integration tests can exercise the reconciler, bundle
//! codec, and store boundary directly without going through the CLI.

pub mod bundle;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod model;
pub mod reconcile;
pub mod store;
pub mod telemetry;
