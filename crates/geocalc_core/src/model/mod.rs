//! Calculator domain model.
//!
//! # Responsibility
//! - Define shapes, operations, input fields and result records.
//! - Keep one typed vocabulary shared by formula, schema and session code.
//!
//! # Invariants
//! - Input values are finite and non-negative wherever they are stored.
//! - Results and history rows are immutable once created.
//!
//! # See also
//! - `crate::schema` for the per-pair field lists.

pub mod input;
pub mod result;
pub mod shape;
