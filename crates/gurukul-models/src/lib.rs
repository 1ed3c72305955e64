//! # Gurukul Models
//!
//! Shared domain vocabulary for the Gurukul API: strongly-typed entity IDs,
//! the role registry's [`Role`] enum, and the curriculum enums that mirror
//! the database types.

pub mod enums;
pub mod ids;
pub mod roles;

pub use enums::{Board, ClassMode, FeeStatus};
pub use roles::{primary_role, Role};
