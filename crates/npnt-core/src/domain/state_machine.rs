//! # Aircraft State Machine
//!
//! Combines breach evaluation with the operational state of the aircraft.
//!
//! ```text
//! [AwaitingGPS] ──fix──→ [AwaitingPermission] ──envelope ok──→ [ReadyToFly]
//!       ↑                        ↑                               │   ↑
//!       └──── fix lost ──────────┼──── envelope not ok ──────────┘   │
//!                                │                          arm  │   │ disarm
//!                                │                               ↓   │
//!                             (reset)                           [Armed]
//!                                                                  │
//!                                                         takeoff  ↓
//!                       [Landed] ←── landing ─────────────── [InFlight]
//!                                                                  │
//!                       [Crashed] ←── crash (Armed or InFlight) ───┘
//! ```
//!
//! Ground transitions (top row) happen on telemetry ticks and may cascade
//! within one tick. Everything from `Armed` onwards moves only on external
//! aircraft events. Breach flags are raised on every tick while an envelope
//! is held and never force a transition.

use super::entities::{
    BreachFlags, Position, PositionFix, TelemetrySnapshot, TickReport, UtcTimestamp,
};
use super::envelope::FlightEnvelope;
use super::errors::TransitionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Operational state of the aircraft.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftState {
    /// Initialized, no position fix yet
    #[default]
    AwaitingGps,
    /// Fix available, no usable envelope
    AwaitingPermission,
    /// Envelope held and current sample within it
    ReadyToFly,
    /// Motors armed, on the ground
    Armed,
    /// Airborne
    InFlight,
    /// Landed; the flight cycle is over
    Landed,
    /// Crash detected; requires explicit reset
    Crashed,
}

impl AircraftState {
    /// Whether a permission artifact may be submitted in this state.
    pub fn accepts_permission(&self) -> bool {
        matches!(
            self,
            AircraftState::AwaitingGps
                | AircraftState::AwaitingPermission
                | AircraftState::ReadyToFly
        )
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AircraftState::AwaitingGps => "AwaitingGPS",
            AircraftState::AwaitingPermission => "AwaitingPermission",
            AircraftState::ReadyToFly => "ReadyToFly",
            AircraftState::Armed => "Armed",
            AircraftState::InFlight => "InFlight",
            AircraftState::Landed => "Landed",
            AircraftState::Crashed => "Crashed",
        };
        f.write_str(name)
    }
}

/// Discrete aircraft-status signals from the flight controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftEvent {
    /// Pilot or autopilot requests arming
    ArmRequested,
    /// Motors disarmed on the ground
    Disarmed,
    /// Takeoff detected
    TakeoffDetected,
    /// Landing detected
    LandingDetected,
    /// Crash detected
    CrashDetected,
}

impl fmt::Display for AircraftEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Reaction reported while airborne with a breach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachResponse {
    /// Flags only
    #[default]
    Advisory,
    /// Also raise `landing_advised` in the tick report
    AdviseLanding,
}

/// Pure event transition table. `gate_open` is the arming gate.
fn next_state(
    state: AircraftState,
    event: AircraftEvent,
    gate_open: bool,
) -> Result<AircraftState, TransitionError> {
    use AircraftEvent as E;
    use AircraftState as S;

    match (state, event) {
        (S::ReadyToFly, E::ArmRequested) if gate_open => Ok(S::Armed),
        (S::ReadyToFly, E::ArmRequested) => Err(TransitionError::ArmingDenied),
        (S::Armed, E::Disarmed) => Ok(S::ReadyToFly),
        (S::Armed, E::TakeoffDetected) => Ok(S::InFlight),
        (S::InFlight, E::LandingDetected) => Ok(S::Landed),
        (S::Armed | S::InFlight, E::CrashDetected) => Ok(S::Crashed),
        (state, event) => Err(TransitionError::NotPermitted { event, state }),
    }
}

/// One step of the tick-driven ground transitions.
fn next_ground_state(state: AircraftState, has_fix: bool, within_envelope: bool) -> AircraftState {
    use AircraftState as S;

    match state {
        S::AwaitingGps if has_fix => S::AwaitingPermission,
        S::AwaitingPermission if within_envelope => S::ReadyToFly,
        S::ReadyToFly if !has_fix => S::AwaitingGps,
        S::ReadyToFly if !within_envelope => S::AwaitingPermission,
        state => state,
    }
}

/// State, breach flags and last fix for one handle.
#[derive(Clone, Debug, Default)]
pub struct AircraftStateMachine {
    state: AircraftState,
    flags: BreachFlags,
    last_fix: Option<PositionFix>,
    /// Last tick had an envelope and a time inside its window
    window_ok: bool,
}

impl AircraftStateMachine {
    /// Machine in `AwaitingGps` with no flags and no fix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> AircraftState {
        self.state
    }

    /// Cumulative breach flags.
    pub fn flags(&self) -> BreachFlags {
        self.flags
    }

    /// Most recent fix consumed.
    pub fn last_fix(&self) -> Option<&PositionFix> {
        self.last_fix.as_ref()
    }

    /// Seconds since the last fix was observed.
    pub fn fix_age(&self, now: UtcTimestamp) -> Option<u64> {
        self.last_fix.and_then(|fix| fix.age(now))
    }

    /// Whether an arm request would be granted now.
    ///
    /// Only `ReadyToFly` is reachable with an envelope in force, and adopting
    /// or revoking an envelope closes the window until the next tick.
    pub fn arming_permitted(&self) -> bool {
        self.state == AircraftState::ReadyToFly && self.window_ok && self.flags.is_empty()
    }

    /// Apply an external aircraft event.
    ///
    /// # Errors
    /// * `ArmingDenied` - arm requested while the gate is closed
    /// * `NotPermitted` - event invalid in the current state; state unchanged
    pub fn apply_event(&mut self, event: AircraftEvent) -> Result<AircraftState, TransitionError> {
        match next_state(self.state, event, self.arming_permitted()) {
            Ok(next) => {
                info!(from = %self.state, to = %next, trigger = %event, "aircraft state transition");
                self.state = next;
                Ok(next)
            }
            Err(e) => {
                warn!(state = %self.state, %event, error = %e, "aircraft event rejected");
                Err(e)
            }
        }
    }

    /// Run one telemetry tick against `envelope`.
    ///
    /// A tick before `valid_from` raises `TimeBreach` like one after
    /// `valid_until`, and the flag holds for the rest of the cycle. An
    /// envelope adopted ahead of its window is therefore unusable until it is
    /// adopted again; hosts should submit artifacts once the window is open.
    pub fn evaluate(
        &mut self,
        envelope: Option<&FlightEnvelope>,
        snapshot: TelemetrySnapshot,
        response: BreachResponse,
    ) -> TickReport {
        let TelemetrySnapshot { time, position } = snapshot;

        if let Some(position) = position {
            self.last_fix = Some(PositionFix {
                position,
                observed_at: time,
            });
        }

        let mut newly_set = BreachFlags::NONE;
        let mut within_envelope = false;
        self.window_ok = false;

        if let Some(env) = envelope {
            let raised = env.check(time, position.as_ref());
            newly_set = raised.difference(self.flags);
            self.flags = self.flags.union(raised);
            if !newly_set.is_empty() {
                warn!(
                    state = %self.state,
                    time_breach = newly_set.time_breach(),
                    fence_breach = newly_set.fence_breach(),
                    issuer = env.issuer_id(),
                    "breach flag set"
                );
            }

            self.window_ok = time.is_some_and(|t| env.is_time_valid(t));
            within_envelope = self.window_ok
                && position.as_ref().is_some_and(|p| env.contains(p))
                && self.flags.is_empty();
        }

        self.advance_ground_state(position.is_some(), within_envelope);

        let breach = self.flags.kind();
        let landing_advised = response == BreachResponse::AdviseLanding
            && self.state == AircraftState::InFlight
            && breach.is_breach();

        debug!(state = %self.state, ?breach, time_available = time.is_some(), "tick evaluated");

        TickReport {
            state: self.state,
            breach,
            newly_set,
            arming_permitted: self.arming_permitted(),
            landing_advised,
            time_available: time.is_some(),
            event: None,
        }
    }

    fn advance_ground_state(&mut self, has_fix: bool, within_envelope: bool) {
        // Longest chain is AwaitingGps -> AwaitingPermission -> ReadyToFly
        for _ in 0..2 {
            let next = next_ground_state(self.state, has_fix, within_envelope);
            if next == self.state {
                break;
            }
            info!(from = %self.state, to = %next, trigger = "telemetry", "aircraft state transition");
            self.state = next;
        }
    }

    /// A new envelope took effect: clear flags and require a fresh tick.
    pub fn on_adopt(&mut self) {
        self.flags = BreachFlags::NONE;
        self.leave_ready_to_fly("adopt");
    }

    /// The envelope was withdrawn.
    pub fn on_revoke(&mut self) {
        self.leave_ready_to_fly("revoke");
    }

    fn leave_ready_to_fly(&mut self, trigger: &'static str) {
        self.window_ok = false;
        if self.state == AircraftState::ReadyToFly {
            info!(from = %self.state, to = %AircraftState::AwaitingPermission, trigger, "aircraft state transition");
            self.state = AircraftState::AwaitingPermission;
        }
    }

    /// Back to `AwaitingGps` with no flags and no fix.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Position of the last fix, if any.
    pub fn last_position(&self) -> Option<Position> {
        self.last_fix.map(|fix| fix.position)
    }

    /// Force state for tests.
    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: AircraftState) {
        self.state = state;
    }
}
