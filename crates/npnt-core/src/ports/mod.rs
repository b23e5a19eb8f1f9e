//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API the flight controller uses
//! - **Outbound (Driven)**: Telemetry the engine consumes

pub mod inbound;
pub mod outbound;
