//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value slot contract used for snapshots.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors; they never decide fallback policy (the service does).

pub mod snapshot_repo;
