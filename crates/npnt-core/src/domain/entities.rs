//! # Domain Entities
//!
//! Telemetry samples, breach flags and the per-tick report.

use serde::{Deserialize, Serialize};

/// UTC instant as seconds since the Unix epoch.
pub type UtcTimestamp = u64;

// =============================================================================
// Geometry
// =============================================================================

/// A fence vertex in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, degrees north in [-90, 90]
    pub latitude: f64,
    /// Longitude, degrees east in [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Absolute aircraft position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude above ground level in metres
    pub altitude_agl: f64,
}

impl Position {
    /// Create a position.
    pub fn new(latitude: f64, longitude: f64, altitude_agl: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_agl,
        }
    }
}

/// Most recent fix consumed by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// The sampled position
    pub position: Position,
    /// Time the sample was consumed, if a time source was available
    pub observed_at: Option<UtcTimestamp>,
}

impl PositionFix {
    /// Seconds elapsed since this fix was observed.
    ///
    /// `None` when either instant is unknown or `now` precedes the fix.
    pub fn age(&self, now: UtcTimestamp) -> Option<u64> {
        self.observed_at.and_then(|t| now.checked_sub(t))
    }
}

/// One push of live telemetry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    /// Current UTC time, `None` when the time source is unavailable
    pub time: Option<UtcTimestamp>,
    /// Current position, `None` when there is no fix
    pub position: Option<Position>,
}

impl TelemetrySnapshot {
    /// Snapshot with both time and position.
    pub fn at(time: UtcTimestamp, position: Position) -> Self {
        Self {
            time: Some(time),
            position: Some(position),
        }
    }
}

// =============================================================================
// Breach Flags
// =============================================================================

/// Cumulative breach flags for one permission cycle.
///
/// Flags only ever get set; they are cleared by adopting a new envelope or
/// resetting the handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachFlags {
    time: bool,
    fence: bool,
}

impl BreachFlags {
    /// No flags set.
    pub const NONE: BreachFlags = BreachFlags {
        time: false,
        fence: false,
    };

    /// Only `TimeBreach`.
    pub const TIME: BreachFlags = BreachFlags {
        time: true,
        fence: false,
    };

    /// Only `FenceBreach`.
    pub const FENCE: BreachFlags = BreachFlags {
        time: false,
        fence: true,
    };

    /// Whether `TimeBreach` is set.
    pub fn time_breach(&self) -> bool {
        self.time
    }

    /// Whether `FenceBreach` is set.
    pub fn fence_breach(&self) -> bool {
        self.fence
    }

    /// Whether no flag is set.
    pub fn is_empty(&self) -> bool {
        !self.time && !self.fence
    }

    /// Union of both flag sets.
    pub fn union(self, other: BreachFlags) -> BreachFlags {
        BreachFlags {
            time: self.time || other.time,
            fence: self.fence || other.fence,
        }
    }

    /// Flags in `self` that are not in `other`.
    pub fn difference(self, other: BreachFlags) -> BreachFlags {
        BreachFlags {
            time: self.time && !other.time,
            fence: self.fence && !other.fence,
        }
    }

    /// Classification of these flags.
    pub fn kind(&self) -> BreachKind {
        match (self.time, self.fence) {
            (false, false) => BreachKind::None,
            (true, false) => BreachKind::Time,
            (false, true) => BreachKind::Fence,
            (true, true) => BreachKind::Both,
        }
    }
}

/// Breach classification exposed to the flight controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreachKind {
    /// No breach in this permission cycle
    #[default]
    None,
    /// Flight outside the validity window
    Time,
    /// Flight outside the fence or above the ceiling
    Fence,
    /// Both time and fence breached
    Both,
}

impl BreachKind {
    /// Whether any breach occurred.
    pub fn is_breach(&self) -> bool {
        !matches!(self, BreachKind::None)
    }
}

// =============================================================================
// Tick Report
// =============================================================================

/// Result of one evaluation tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// State after the tick
    pub state: super::state_machine::AircraftState,
    /// Cumulative breach classification after the tick
    pub breach: BreachKind,
    /// Flags that this tick set for the first time in the cycle
    pub newly_set: BreachFlags,
    /// Whether an arm request would currently be granted
    pub arming_permitted: bool,
    /// Set under `BreachResponse::AdviseLanding` while airborne with a breach
    pub landing_advised: bool,
    /// Whether the time source delivered a time on this tick
    pub time_available: bool,
    /// Aircraft event consumed by a pull-model tick and how it was handled
    #[serde(default)]
    pub event: Option<EventOutcome>,
}

/// An aircraft event applied during a tick, with its transition result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// The event taken from the telemetry source
    pub event: super::state_machine::AircraftEvent,
    /// New state, or why the event was refused
    pub result: Result<super::state_machine::AircraftState, super::errors::TransitionError>,
}

impl EventOutcome {
    /// Whether the state machine refused the event.
    pub fn is_rejected(&self) -> bool {
        self.result.is_err()
    }
}
