//! # Gurukul Core
//!
//! Shared foundation types for the Gurukul API:
//!
//! - [`file_storage`]: trait-based file storage with a local-disk backend
//! - [`metrics`]: derived academic metrics (attendance, grade bands)
//! - [`pagination`]: pagination utilities for list endpoints
//! - [`serde`]: custom serde helpers for query-string parsing

pub mod file_storage;
pub mod metrics;
pub mod pagination;
pub mod serde;

pub use pagination::{PaginationMeta, PaginationParams};
