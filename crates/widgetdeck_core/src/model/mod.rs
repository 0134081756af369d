//! Normalized domain model for the dashboard.
//!
//! # Responsibility
//! - Define the canonical category/widget shapes shared by store and
//!   persistence code.
//! - Keep entity identifiers in disjoint, prefix-tagged id spaces.
//!
//! # Invariants
//! - Every entity is identified by a stable prefixed id (`widget-` or
//!   `category-`), so no lookup can resolve to the wrong entity type.
//! - Deletion of a widget must be cascaded to every category link;
//!   deletion of a category never cascades to widgets.

pub mod dashboard;
pub mod ids;
