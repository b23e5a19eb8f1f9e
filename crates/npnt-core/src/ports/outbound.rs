//! # Outbound Ports (Driven Ports / SPI)
//!
//! Telemetry sources the engine pulls from on [`tick`](crate::NpntHandle::tick).

use crate::domain::entities::{Position, TelemetrySnapshot, UtcTimestamp};
use crate::domain::state_machine::AircraftEvent;

/// Source of time, position and aircraft-status events.
///
/// `None` means unavailable: no time source or no fix. Implementations must
/// not substitute defaults.
pub trait TelemetrySource {
    /// Current UTC time in epoch seconds.
    fn current_time(&mut self) -> Option<UtcTimestamp>;

    /// Current absolute position.
    fn current_position(&mut self) -> Option<Position>;

    /// Next pending aircraft-status event, if any.
    fn next_aircraft_event(&mut self) -> Option<AircraftEvent>;

    /// Take the next event and sample time and position, in that order.
    fn poll(&mut self) -> (Option<AircraftEvent>, TelemetrySnapshot) {
        let event = self.next_aircraft_event();
        let snapshot = TelemetrySnapshot {
            time: self.current_time(),
            position: self.current_position(),
        };
        (event, snapshot)
    }
}
