// Library root: exposes the engine and the HTTP layer for integration tests
// in `tests/`. Production entry point remains `src/main.rs`.

pub mod api;
pub mod classifier;
pub mod coordinator;
pub mod desk;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod validation;

// Binary-only plumbing, public so `main.rs` can reach it through the crate.
pub mod cli;
pub mod config;
pub mod logging;
