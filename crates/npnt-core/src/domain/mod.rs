//! # Domain Layer
//!
//! Verification, parsing, geometry and the state machine. No I/O.

pub mod artifact;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod geofence;
pub mod signature;
pub mod state_machine;
