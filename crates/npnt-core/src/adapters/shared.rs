//! # Shared Handle
//!
//! [`NpntHandle`] behind one `parking_lot::Mutex` for multi-threaded hosts.
//! Each call takes the lock exactly once, so adoption and evaluation are
//! serialized and readers never see a half-updated envelope.

use crate::domain::artifact::PermissionArtifact;
use crate::domain::entities::{BreachKind, TelemetrySnapshot, TickReport};
use crate::domain::envelope::FlightEnvelope;
use crate::domain::errors::{PermissionError, TransitionError};
use crate::domain::state_machine::{AircraftEvent, AircraftState};
use crate::handle::NpntHandle;
use crate::ports::inbound::PermissionApi;
use crate::ports::outbound::TelemetrySource;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, thread-safe handle.
#[derive(Clone, Debug)]
pub struct SharedHandle {
    inner: Arc<Mutex<NpntHandle>>,
}

impl SharedHandle {
    /// Wrap a handle.
    pub fn new(handle: NpntHandle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handle)),
        }
    }

    /// Run `f` with exclusive access, for compound operations.
    pub fn with<R>(&self, f: impl FnOnce(&mut NpntHandle) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Pull telemetry from `source` and run one tick.
    ///
    /// The source is read before the lock is taken, so a slow sensor read
    /// never blocks other users of the handle.
    pub fn tick(&self, source: &mut dyn TelemetrySource) -> TickReport {
        let (event, snapshot) = source.poll();
        self.inner.lock().step(event, snapshot)
    }

    /// Whether an arm request would be granted now.
    pub fn arming_permitted(&self) -> bool {
        self.inner.lock().arming_permitted()
    }
}

impl PermissionApi for SharedHandle {
    fn submit_artifact(
        &mut self,
        artifact: &PermissionArtifact,
    ) -> Result<Arc<FlightEnvelope>, PermissionError> {
        self.inner.lock().submit_artifact(artifact)
    }

    fn submit_bundle(&mut self, bundle: &[u8]) -> Result<Arc<FlightEnvelope>, PermissionError> {
        self.inner.lock().submit_bundle(bundle)
    }

    fn revoke(&mut self) -> Result<(), PermissionError> {
        self.inner.lock().revoke()
    }

    fn envelope(&self) -> Option<Arc<FlightEnvelope>> {
        self.inner.lock().envelope()
    }

    fn evaluate(&mut self, snapshot: TelemetrySnapshot) -> TickReport {
        self.inner.lock().evaluate(snapshot)
    }

    fn apply_event(&mut self, event: AircraftEvent) -> Result<AircraftState, TransitionError> {
        self.inner.lock().apply_event(event)
    }

    fn aircraft_state(&self) -> AircraftState {
        self.inner.lock().aircraft_state()
    }

    fn breach_state(&self) -> BreachKind {
        self.inner.lock().breach_state()
    }

    fn reset(&mut self) {
        self.inner.lock().reset()
    }
}
