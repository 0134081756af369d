//! Core use-case services.
//!
//! # Responsibility
//! - Sequence "mutate, then persist" around the pure store reducer.
//! - Keep UI layers decoupled from storage details.

pub mod dashboard_service;
