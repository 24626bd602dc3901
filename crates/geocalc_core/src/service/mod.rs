//! Core use-case services.
//!
//! # Responsibility
//! - Turn presentation-layer events into session state transitions.
//! - Keep UI/FFI layers decoupled from formula and schema details.

pub mod session;
