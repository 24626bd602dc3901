//! Flutter bridge for the geocalc core.
//!
//! Dart bindings are generated from `api`; this crate holds no domain logic.

pub mod api;
