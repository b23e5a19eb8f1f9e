//! # NPNT Benchmarks
//!
//! Criterion groups for the per-tick hot path and artifact adoption.
//! A tick runs on the flight controller at telemetry rate, so pnpoly and
//! evaluation must stay in the low microseconds even for large fences.

pub mod geofence;
pub mod tick;
pub mod verification;
