//! # NPNT Handle
//!
//! Application service implementing [`PermissionApi`].
//!
//! One handle per aircraft. It owns the trust store, the adopted envelope
//! and the state machine for the lifetime of a permission cycle:
//!
//! ```text
//! bundle ──decode──→ artifact ──verify──→ verified ──parse──→ envelope ──adopt──→ handle
//! ```
//!
//! Every step before adoption is side-effect free, so a rejected artifact
//! never disturbs the envelope already in force.

use crate::config::EngineConfig;
use crate::domain::artifact::{PermissionArtifact, VerifiedArtifact};
use crate::domain::entities::{
    BreachFlags, BreachKind, EventOutcome, PositionFix, TelemetrySnapshot, TickReport,
};
use crate::domain::envelope::{Fence, FlightEnvelope};
use crate::domain::errors::{ConfigError, PermissionError, TransitionError};
use crate::domain::signature::TrustStore;
use crate::domain::state_machine::{AircraftEvent, AircraftState, AircraftStateMachine};
use crate::ports::inbound::PermissionApi;
use crate::ports::outbound::TelemetrySource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-aircraft compliance context.
#[derive(Debug)]
pub struct NpntHandle {
    config: EngineConfig,
    trust_store: TrustStore,
    envelope: Option<Arc<FlightEnvelope>>,
    machine: AircraftStateMachine,
    permission_cycle: u64,
}

impl NpntHandle {
    /// Create a handle in `AwaitingGps` with no envelope.
    ///
    /// # Errors
    /// Any trust anchor in `config` that fails to decode.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let trust_store = config.validate()?;
        info!(
            anchors = trust_store.len(),
            aircraft_uin = config.aircraft_uin.as_deref().unwrap_or("-"),
            "npnt handle initialized"
        );
        Ok(Self {
            config,
            trust_store,
            envelope: None,
            machine: AircraftStateMachine::new(),
            permission_cycle: 0,
        })
    }

    /// Configuration this handle was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decoded trust anchors.
    pub fn trust_store(&self) -> &TrustStore {
        &self.trust_store
    }

    fn ensure_accepts_permission(&self) -> Result<(), PermissionError> {
        let state = self.machine.state();
        if state.accepts_permission() {
            Ok(())
        } else {
            Err(PermissionError::InvalidState { state })
        }
    }

    fn rejected(&self, error: PermissionError) -> PermissionError {
        warn!(
            reason = error.reason().as_str(),
            state = %self.machine.state(),
            %error,
            "permission artifact rejected"
        );
        error
    }

    /// Adopt an already validated envelope.
    ///
    /// Replaces the envelope by swapping the `Arc`, clears breach flags and
    /// starts a new permission cycle. From `ReadyToFly` the aircraft returns
    /// to `AwaitingPermission` until the next tick re-evaluates.
    ///
    /// # Errors
    /// `InvalidState` when armed, airborne, landed or crashed.
    pub fn adopt(&mut self, envelope: FlightEnvelope) -> Result<Arc<FlightEnvelope>, PermissionError> {
        self.ensure_accepts_permission()
            .map_err(|e| self.rejected(e))?;

        let envelope = Arc::new(envelope);
        self.envelope = Some(Arc::clone(&envelope));
        self.machine.on_adopt();
        self.permission_cycle += 1;

        info!(
            issuer = envelope.issuer_id(),
            artifact_id = envelope.artifact_id().unwrap_or("-"),
            payload_sha256 = envelope.metadata().payload_sha256.as_deref().unwrap_or("-"),
            vertices = envelope.fence().len(),
            max_altitude_agl = envelope.max_altitude_agl(),
            valid_from = envelope.valid_from(),
            valid_until = envelope.valid_until(),
            cycle = self.permission_cycle,
            "permission artifact adopted"
        );
        Ok(envelope)
    }

    /// Pull telemetry from `source` and run one tick.
    ///
    /// See [`step`](Self::step).
    pub fn tick(&mut self, source: &mut dyn TelemetrySource) -> TickReport {
        let (event, snapshot) = source.poll();
        self.step(event, snapshot)
    }

    /// Apply `event`, if any, then evaluate `snapshot`.
    ///
    /// A rejected event does not stop the tick; its outcome is returned in
    /// [`TickReport::event`] either way.
    pub fn step(&mut self, event: Option<AircraftEvent>, snapshot: TelemetrySnapshot) -> TickReport {
        let outcome = event.map(|event| EventOutcome {
            event,
            result: self.apply_event(event),
        });
        let mut report = self.evaluate(snapshot);
        report.event = outcome;
        report
    }

    /// Cumulative breach flags.
    pub fn breach_flags(&self) -> BreachFlags {
        self.machine.flags()
    }

    /// Whether an arm request would be granted now.
    pub fn arming_permitted(&self) -> bool {
        self.envelope.is_some() && self.machine.arming_permitted()
    }

    /// Fence of the adopted envelope.
    pub fn fence(&self) -> Option<&Fence> {
        self.envelope.as_deref().map(FlightEnvelope::fence)
    }

    /// Altitude ceiling of the adopted envelope.
    pub fn max_altitude(&self) -> Option<f64> {
        self.envelope.as_deref().map(FlightEnvelope::max_altitude_agl)
    }

    /// Most recent fix consumed by a tick.
    pub fn last_known_position(&self) -> Option<&PositionFix> {
        self.machine.last_fix()
    }

    /// Number of envelopes adopted since creation.
    pub fn permission_cycle(&self) -> u64 {
        self.permission_cycle
    }
}

impl PermissionApi for NpntHandle {
    fn submit_artifact(
        &mut self,
        artifact: &PermissionArtifact,
    ) -> Result<Arc<FlightEnvelope>, PermissionError> {
        self.ensure_accepts_permission()
            .map_err(|e| self.rejected(e))?;

        let envelope = VerifiedArtifact::authenticate(artifact, &self.trust_store)
            .map_err(PermissionError::from)
            .and_then(|verified| {
                debug!(signer = verified.signer().issuer_id(), "artifact signature verified");
                verified
                    .parse(self.config.aircraft_uin.as_deref())
                    .map_err(PermissionError::from)
            })
            .map_err(|e| self.rejected(e))?;

        self.adopt(envelope)
    }

    fn submit_bundle(&mut self, bundle: &[u8]) -> Result<Arc<FlightEnvelope>, PermissionError> {
        self.ensure_accepts_permission()
            .map_err(|e| self.rejected(e))?;

        let artifact = PermissionArtifact::from_bundle(bundle, self.config.artifact_encoding)
            .map_err(|e| self.rejected(e.into()))?;
        self.submit_artifact(&artifact)
    }

    fn revoke(&mut self) -> Result<(), PermissionError> {
        self.ensure_accepts_permission()
            .map_err(|e| self.rejected(e))?;

        if let Some(envelope) = self.envelope.take() {
            info!(issuer = envelope.issuer_id(), "permission revoked");
        }
        self.machine.on_revoke();
        Ok(())
    }

    fn envelope(&self) -> Option<Arc<FlightEnvelope>> {
        self.envelope.clone()
    }

    fn evaluate(&mut self, snapshot: TelemetrySnapshot) -> TickReport {
        let mut report = self.machine.evaluate(
            self.envelope.as_deref(),
            snapshot,
            self.config.breach_response,
        );
        report.arming_permitted = self.arming_permitted();
        report
    }

    fn apply_event(&mut self, event: AircraftEvent) -> Result<AircraftState, TransitionError> {
        if event == AircraftEvent::ArmRequested && self.envelope.is_none() {
            warn!(state = %self.machine.state(), "arm requested without permission");
            return Err(TransitionError::ArmingDenied);
        }
        self.machine.apply_event(event)
    }

    fn aircraft_state(&self) -> AircraftState {
        self.machine.state()
    }

    fn breach_state(&self) -> BreachKind {
        self.machine.flags().kind()
    }

    fn reset(&mut self) {
        info!(from = %self.machine.state(), cycle = self.permission_cycle, "npnt handle reset");
        self.envelope = None;
        self.machine.reset();
    }
}
