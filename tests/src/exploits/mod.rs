//! # Exploit Simulations
//!
//! Hostile inputs a ground station, a compromised companion computer or a
//! man-in-the-middle on the artifact upload path could present.
//!
//! | Module | Attack |
//! |--------|--------|
//! | `forgery` | Tampered payloads, foreign keys, spliced signatures |
//! | `malleability` | Bit flips, truncation, high-S ECDSA |
//! | `replay` | Artifacts replayed to another airframe, window or state |

pub mod forgery;
pub mod malleability;
