//! # NPNT Compliance Engine
//!
//! Onboard enforcement of regulator-issued permission artifacts for
//! unmanned aircraft (No Permission, No Takeoff).
//!
//! The engine authenticates a signed artifact against configured trust
//! anchors, extracts the flight envelope it grants (fence polygon, altitude
//! ceiling, validity window), compares live telemetry against that envelope
//! and drives the aircraft state machine that gates arming.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): verification, parsing, geometry and state, no I/O
//! - **Ports Layer** (`ports/`): `PermissionApi` inbound, `TelemetrySource` outbound
//! - **Adapters Layer** (`adapters/`): transport codec, telemetry sources, shared handle
//! - **Service Layer** (`handle.rs`): `NpntHandle` wires domain logic to ports
//!
//! ## Safety Notes
//!
//! - **Authenticate before parse**: the parser only accepts a `VerifiedArtifact`
//! - **Non-destructive rejection**: a rejected artifact never alters the handle
//! - **Advisory breaches**: breach flags are reported, never acted upon
//!
//! ## Example
//!
//! ```no_run
//! use npnt_core::{EngineConfig, NpntHandle, PermissionApi, Position, TelemetrySnapshot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut handle = NpntHandle::new(EngineConfig::default())?;
//! handle.submit_bundle(br#"{"payload": "...", "signature": "..."}"#)?;
//! let report = handle.evaluate(TelemetrySnapshot::at(
//!     1_700_000_010,
//!     Position::new(5.0, 5.0, 50.0),
//! ));
//! println!("{:?} arming={}", report.state, report.arming_permitted);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod handle;
pub mod ports;

// Re-export public API
pub use adapters::codec::ArtifactBundle;
pub use adapters::shared::SharedHandle;
pub use adapters::telemetry::{FixedPositionTelemetry, ManualTelemetry};
pub use config::{ArtifactEncoding, EngineConfig, TrustAnchorConfig};
pub use domain::artifact::{parse_envelope, PermissionArtifact, VerifiedArtifact};
pub use domain::entities::{
    BreachFlags, BreachKind, Coordinate, EventOutcome, Position, PositionFix, TelemetrySnapshot,
    TickReport, UtcTimestamp,
};
pub use domain::envelope::{ArtifactMetadata, Fence, FlightEnvelope, MIN_FENCE_VERTICES};
pub use domain::errors::{
    ArtifactError, CodecError, ConfigError, PermissionError, RejectionReason, SignatureError,
    TransitionError,
};
pub use domain::geofence::point_in_polygon;
pub use domain::signature::{
    verify_artifact_signature, AuthorityKey, SignatureAlgorithm, TrustAnchor, TrustStore,
};
pub use domain::state_machine::{
    AircraftEvent, AircraftState, AircraftStateMachine, BreachResponse,
};
pub use handle::NpntHandle;
pub use ports::inbound::PermissionApi;
pub use ports::outbound::TelemetrySource;
