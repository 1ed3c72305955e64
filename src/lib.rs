//! # Gurukul API
//!
//! A tuition-center management REST API built with Rust, Axum, and
//! PostgreSQL: role-gated dashboards for admins, teachers, students, and
//! parents over a shared relational schema.
//!
//! ## Overview
//!
//! - **Authentication**: JWT access tokens, bcrypt-hashed credentials,
//!   self-service student signup
//! - **Role registry**: multi-role-per-user `user_roles` table, queried on
//!   every gate and failing closed; login redirects by the fixed priority
//!   admin > teacher > parent > student
//! - **Domain**: batches, students, classes, attendance, fees, tests and
//!   marks, tasks and submissions, class notes, events, notifications,
//!   testimonials, demo bookings
//! - **Change feed**: one in-process dispatcher; mutations publish
//!   (entity, op, id) events streamed to clients over SSE
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Bootstrap commands (create-admin)
//! ├── config/           # from_env() config structs (db, JWT, CORS, ...)
//! ├── middleware/       # AuthUser extractor + registry-backed role gates
//! ├── modules/          # Feature modules
//! │   └── <feature>/    # controller / service / model / router
//! ├── docs.rs           # OpenAPI aggregate
//! ├── logging.rs        # Request logging + tracing init
//! ├── realtime.rs       # Change-event dispatcher + SSE endpoint
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared AppState
//! └── utils/            # Errors, JWT, password hashing
//! ```
//!
//! Each feature module follows the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic and queries), `model.rs`
//! (entities and DTOs), `router.rs` (route table).
//!
//! ## Mutation patterns
//!
//! Two deliberate shapes recur. Full-roster saves (attendance, test marks)
//! replace the stored child-row set inside a transaction, so the stored set
//! always equals either the previous or the submitted roster. Single-row
//! toggles (task submissions, batch assignment) upsert on their natural key
//! and are idempotent.

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod realtime;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use gurukul_core;
pub use gurukul_models;
