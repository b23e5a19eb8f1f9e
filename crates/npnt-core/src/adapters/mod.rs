//! # Adapters Module
//!
//! Infrastructure adapters implementing the ports: transport codec,
//! telemetry sources and the lock-wrapped shared handle.

pub mod codec;
pub mod shared;
pub mod telemetry;
