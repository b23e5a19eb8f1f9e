//! # Inbound Ports (Driving Ports / API)
//!
//! The permission API exposed to the flight controller.

use crate::domain::artifact::PermissionArtifact;
use crate::domain::entities::{BreachKind, TelemetrySnapshot, TickReport};
use crate::domain::envelope::FlightEnvelope;
use crate::domain::errors::{PermissionError, TransitionError};
use crate::domain::state_machine::{AircraftEvent, AircraftState};
use std::sync::Arc;

/// Primary permission API.
///
/// Every method is synchronous and bounded; nothing here blocks or spawns
/// work. Implementations must be `Send + Sync` so they can be shared behind
/// a lock.
pub trait PermissionApi: Send + Sync {
    // =========================================================================
    // Permission
    // =========================================================================

    /// Verify, parse and adopt a permission artifact.
    ///
    /// # Errors
    /// Returns the rejection reason; on any error the current envelope, flags
    /// and state are unchanged.
    fn submit_artifact(
        &mut self,
        artifact: &PermissionArtifact,
    ) -> Result<Arc<FlightEnvelope>, PermissionError>;

    /// Decode a transport bundle, then [`submit_artifact`](Self::submit_artifact).
    fn submit_bundle(&mut self, bundle: &[u8]) -> Result<Arc<FlightEnvelope>, PermissionError>;

    /// Withdraw the current envelope. Only allowed before arming.
    fn revoke(&mut self) -> Result<(), PermissionError>;

    /// Currently adopted envelope.
    fn envelope(&self) -> Option<Arc<FlightEnvelope>>;

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Run one evaluation tick on pushed telemetry.
    fn evaluate(&mut self, snapshot: TelemetrySnapshot) -> TickReport;

    /// Apply an external aircraft-status event.
    fn apply_event(&mut self, event: AircraftEvent) -> Result<AircraftState, TransitionError>;

    /// Current aircraft state.
    fn aircraft_state(&self) -> AircraftState;

    /// Cumulative breach classification.
    fn breach_state(&self) -> BreachKind;

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Discard envelope, flags and fix; back to `AwaitingGps`.
    fn reset(&mut self);
}
