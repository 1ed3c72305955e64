//! Application configuration, loaded from environment variables.
//!
//! Each submodule owns one concern and exposes a `from_env()` constructor;
//! `AppState` aggregates the results once at startup.

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod storage;
