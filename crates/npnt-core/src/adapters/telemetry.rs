//! # Telemetry Adapters
//!
//! [`TelemetrySource`] implementations for tests and bench use.

use crate::domain::entities::{Position, UtcTimestamp};
use crate::domain::state_machine::AircraftEvent;
use crate::ports::outbound::TelemetrySource;
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Settable telemetry with a FIFO of pending aircraft events.
#[derive(Clone, Debug, Default)]
pub struct ManualTelemetry {
    time: Option<UtcTimestamp>,
    position: Option<Position>,
    events: VecDeque<AircraftEvent>,
}

impl ManualTelemetry {
    /// No time, no fix, no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the current time.
    pub fn set_time(&mut self, time: Option<UtcTimestamp>) {
        self.time = time;
    }

    /// Set or clear the current fix.
    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    /// Move to `position` at `time`.
    pub fn move_to(&mut self, time: UtcTimestamp, position: Position) {
        self.time = Some(time);
        self.position = Some(position);
    }

    /// Queue an aircraft event.
    pub fn push_event(&mut self, event: AircraftEvent) {
        self.events.push_back(event);
    }

    /// Events not yet consumed.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl TelemetrySource for ManualTelemetry {
    fn current_time(&mut self) -> Option<UtcTimestamp> {
        self.time
    }

    fn current_position(&mut self) -> Option<Position> {
        self.position
    }

    fn next_aircraft_event(&mut self) -> Option<AircraftEvent> {
        self.events.pop_front()
    }
}

/// System clock plus a fixed position; never produces events.
#[derive(Clone, Copy, Debug)]
pub struct FixedPositionTelemetry {
    position: Option<Position>,
}

impl FixedPositionTelemetry {
    /// Report `position` on every tick.
    pub fn new(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Report no fix.
    pub fn without_fix() -> Self {
        Self { position: None }
    }
}

impl TelemetrySource for FixedPositionTelemetry {
    fn current_time(&mut self) -> Option<UtcTimestamp> {
        // A clock set before the epoch counts as unavailable
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs())
    }

    fn current_position(&mut self) -> Option<Position> {
        self.position
    }

    fn next_aircraft_event(&mut self) -> Option<AircraftEvent> {
        None
    }
}
