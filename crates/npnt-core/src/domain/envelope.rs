//! # Flight Envelope
//!
//! The validated record extracted from an accepted permission artifact.
//!
//! Every field is private and the only constructors validate all
//! invariants, so an envelope either exists fully formed or not at all.

use super::entities::{BreachFlags, Coordinate, Position, UtcTimestamp};
use super::errors::ArtifactError;
use super::geofence::point_in_polygon;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Minimum number of distinct vertices in a fence polygon.
pub const MIN_FENCE_VERTICES: usize = 3;

// =============================================================================
// Fence
// =============================================================================

/// Closed fence polygon with cached split vertex arrays.
///
/// Insertion order defines the edges; the last vertex connects to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Fence {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl Fence {
    /// Build a fence, checking coordinate ranges and vertex count.
    ///
    /// # Errors
    /// * `CoordinateOutOfRange` - a vertex is not finite or outside WGS84 ranges
    /// * `TooFewVertices` - fewer than three distinct vertices
    pub fn new(vertices: &[Coordinate]) -> Result<Self, ArtifactError> {
        for (index, v) in vertices.iter().enumerate() {
            if !v.is_valid() {
                return Err(ArtifactError::CoordinateOutOfRange {
                    index,
                    latitude: v.latitude,
                    longitude: v.longitude,
                });
            }
        }

        let distinct = count_distinct(vertices);
        if distinct < MIN_FENCE_VERTICES {
            return Err(ArtifactError::TooFewVertices { distinct });
        }

        Ok(Self {
            latitudes: vertices.iter().map(|v| v.latitude).collect(),
            longitudes: vertices.iter().map(|v| v.longitude).collect(),
        })
    }

    /// Number of vertices as supplied (including a repeated closing vertex).
    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    /// Always false; a fence has at least three vertices.
    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }

    /// Vertex latitudes in insertion order.
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Vertex longitudes in insertion order.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.latitudes
            .iter()
            .zip(&self.longitudes)
            .map(|(&lat, &lon)| Coordinate::new(lat, lon))
    }

    /// Crossing-number containment test.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        point_in_polygon(&self.latitudes, &self.longitudes, latitude, longitude)
    }
}

impl Serialize for Fence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.vertices())
    }
}

/// Distinct vertices by exact value, with -0.0 and 0.0 treated as equal.
fn count_distinct(vertices: &[Coordinate]) -> usize {
    let key = |x: f64| if x == 0.0 { 0u64 } else { x.to_bits() };
    vertices
        .iter()
        .map(|v| (key(v.latitude), key(v.longitude)))
        .collect::<HashSet<_>>()
        .len()
}

// =============================================================================
// Flight Envelope
// =============================================================================

/// Descriptive fields carried for audit; none affect breach evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactMetadata {
    /// Authority-assigned artifact identifier
    pub artifact_id: Option<String>,
    /// Unique identification number of the aircraft the artifact is bound to
    pub aircraft_uin: Option<String>,
    /// Declared purpose of the flight
    pub flight_purpose: Option<String>,
    /// Hex SHA-256 of the signed payload
    pub payload_sha256: Option<String>,
}

/// Bounded flight envelope granted by a permission artifact.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightEnvelope {
    fence: Fence,
    max_altitude_agl: f64,
    valid_from: UtcTimestamp,
    valid_until: UtcTimestamp,
    issuer_id: String,
    #[serde(flatten)]
    metadata: ArtifactMetadata,
}

impl FlightEnvelope {
    /// Build an envelope.
    ///
    /// # Errors
    /// * `InvalidAltitude` - ceiling negative or not finite
    /// * `InvalidTimeWindow` - `valid_from >= valid_until`
    pub fn new(
        fence: Fence,
        max_altitude_agl: f64,
        valid_from: UtcTimestamp,
        valid_until: UtcTimestamp,
        issuer_id: impl Into<String>,
    ) -> Result<Self, ArtifactError> {
        if !max_altitude_agl.is_finite() || max_altitude_agl < 0.0 {
            return Err(ArtifactError::InvalidAltitude(max_altitude_agl));
        }
        if valid_from >= valid_until {
            return Err(ArtifactError::InvalidTimeWindow {
                valid_from,
                valid_until,
            });
        }

        Ok(Self {
            fence,
            max_altitude_agl,
            valid_from,
            valid_until,
            issuer_id: issuer_id.into(),
            metadata: ArtifactMetadata::default(),
        })
    }

    /// Attach audit metadata.
    pub fn with_metadata(mut self, metadata: ArtifactMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Fence polygon.
    pub fn fence(&self) -> &Fence {
        &self.fence
    }

    /// Altitude ceiling in metres above ground level.
    pub fn max_altitude_agl(&self) -> f64 {
        self.max_altitude_agl
    }

    /// Start of the validity window (inclusive).
    pub fn valid_from(&self) -> UtcTimestamp {
        self.valid_from
    }

    /// End of the validity window (exclusive).
    pub fn valid_until(&self) -> UtcTimestamp {
        self.valid_until
    }

    /// Identity of the authority that signed the artifact.
    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    /// Audit metadata.
    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.metadata.artifact_id.as_deref()
    }

    pub fn aircraft_uin(&self) -> Option<&str> {
        self.metadata.aircraft_uin.as_deref()
    }

    pub fn flight_purpose(&self) -> Option<&str> {
        self.metadata.flight_purpose.as_deref()
    }

    /// Whether `now` lies in `[valid_from, valid_until)`.
    pub fn is_time_valid(&self, now: UtcTimestamp) -> bool {
        (self.valid_from..self.valid_until).contains(&now)
    }

    /// Whether the position is inside the fence and at or below the ceiling.
    pub fn contains(&self, position: &Position) -> bool {
        self.fence.contains(position.latitude, position.longitude)
            && position.altitude_agl <= self.max_altitude_agl
    }

    /// Breach flags raised by this sample.
    ///
    /// A missing time or position raises nothing for the part it would test.
    /// Times before `valid_from` raise `TIME` as well; an early sample is a
    /// breach, not a wait.
    pub fn check(&self, time: Option<UtcTimestamp>, position: Option<&Position>) -> BreachFlags {
        let mut flags = BreachFlags::NONE;
        if let Some(now) = time {
            if !self.is_time_valid(now) {
                flags = flags.union(BreachFlags::TIME);
            }
        }
        if let Some(p) = position {
            if !self.contains(p) {
                flags = flags.union(BreachFlags::FENCE);
            }
        }
        flags
    }
}
