// Library root — the binary in `src/main.rs` and the integration tests in
// `tests/` both go through these modules.

pub mod alerts;
pub mod db;
pub mod document;
pub mod error;
pub mod models;
pub mod presentation;
pub mod readings;
pub mod repository;
pub mod services;

// Only the binary needs these, but they stay public so integration tests
// can reach them.
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
