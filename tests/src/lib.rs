//! # NPNT Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Authority keys, payload builders, signed artifacts
//! ├── benchmarks/       # Criterion groups (pnpoly, verification, ticks)
//! ├── exploits/         # Forged, tampered and replayed artifacts
//! └── integration/      # End-to-end permission cycles
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p npnt-tests
//!
//! # By category
//! cargo test -p npnt-tests integration::
//! cargo test -p npnt-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p npnt-tests
//! ```

#![allow(unused_variables)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
