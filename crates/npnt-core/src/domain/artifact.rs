//! # Artifact Parser
//!
//! Turns an authenticated permission payload into a [`FlightEnvelope`].
//!
//! Parsing is only reachable through [`VerifiedArtifact`], which can only be
//! obtained by passing signature verification, so untrusted structure is
//! never decoded.
//!
//! ## Payload Format
//!
//! ```json
//! {
//!   "permissionArtifactId": "PA-0001",
//!   "issuer": "DGCA",
//!   "uaDetails": { "uinNo": "UIN0001" },
//!   "flightParameters": {
//!     "flightPurpose": "survey",
//!     "maxAltitude": 120.0,
//!     "flightStartTime": 1700000000,
//!     "flightEndTime": "2023-11-14T23:13:20Z",
//!     "coordinates": [ { "latitude": 0.0, "longitude": 0.0 } ]
//!   }
//! }
//! ```
//!
//! Times are epoch seconds or RFC 3339 strings. Only `flightParameters` and
//! its `maxAltitude`, `flightStartTime`, `flightEndTime` and `coordinates`
//! are mandatory.

use super::entities::{Coordinate, UtcTimestamp};
use super::envelope::{ArtifactMetadata, Fence, FlightEnvelope};
use super::errors::{ArtifactError, SignatureError};
use super::signature::{verify_artifact_signature, TrustAnchor, TrustStore};
use chrono::DateTime;
use serde::Deserialize;
use sha2::{Digest, Sha256};

// =============================================================================
// RAW AND VERIFIED ARTIFACTS
// =============================================================================

/// Signed payload plus detached signature, after transport decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionArtifact {
    /// Payload bytes exactly as signed
    pub payload: Vec<u8>,
    /// Detached signature bytes
    pub signature: Vec<u8>,
}

impl PermissionArtifact {
    /// Create from raw bytes.
    pub fn new(payload: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            signature: signature.into(),
        }
    }
}

/// A payload whose signature has been checked against a trust anchor.
#[derive(Clone, Copy, Debug)]
pub struct VerifiedArtifact<'a> {
    payload: &'a [u8],
    signer: &'a TrustAnchor,
}

impl<'a> VerifiedArtifact<'a> {
    /// Authenticate `artifact` against `store`.
    pub fn authenticate(
        artifact: &'a PermissionArtifact,
        store: &'a TrustStore,
    ) -> Result<Self, SignatureError> {
        let signer = verify_artifact_signature(&artifact.payload, &artifact.signature, store)?;
        Ok(Self {
            payload: &artifact.payload,
            signer,
        })
    }

    /// The anchor that verified the payload.
    pub fn signer(&self) -> &TrustAnchor {
        self.signer
    }

    /// SHA-256 of the payload bytes.
    pub fn payload_digest(&self) -> [u8; 32] {
        Sha256::digest(self.payload).into()
    }

    /// Parse the envelope; see [`parse_envelope`].
    pub fn parse(&self, expected_uin: Option<&str>) -> Result<FlightEnvelope, ArtifactError> {
        parse_envelope(self, expected_uin)
    }
}

// =============================================================================
// WIRE FORMAT
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    permission_artifact_id: Option<String>,
    issuer: Option<String>,
    ua_details: Option<RawUaDetails>,
    flight_parameters: Option<RawFlightParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUaDetails {
    uin_no: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlightParameters {
    flight_purpose: Option<String>,
    max_altitude: Option<f64>,
    flight_start_time: Option<RawTime>,
    flight_end_time: Option<RawTime>,
    coordinates: Option<Vec<Coordinate>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Epoch(u64),
    Text(String),
}

impl RawTime {
    fn to_timestamp(&self, field: &'static str) -> Result<UtcTimestamp, ArtifactError> {
        match self {
            RawTime::Epoch(secs) => Ok(*secs),
            RawTime::Text(text) => {
                let parsed = DateTime::parse_from_rfc3339(text).map_err(|e| {
                    ArtifactError::InvalidTimestamp {
                        field,
                        reason: e.to_string(),
                    }
                })?;
                u64::try_from(parsed.timestamp()).map_err(|_| ArtifactError::InvalidTimestamp {
                    field,
                    reason: "before the Unix epoch".to_string(),
                })
            }
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract and validate the flight envelope from a verified payload.
///
/// The envelope's issuer is the verifying anchor. When `expected_uin` is set,
/// an artifact naming a different aircraft is rejected.
///
/// # Errors
/// * `Malformed` - not UTF-8 JSON of the expected shape
/// * `IssuerMismatch` - declared issuer differs from the signer
/// * `AircraftMismatch` - declared UIN differs from `expected_uin`
/// * `MissingField` / `TooFewVertices` - mandatory data absent
/// * `CoordinateOutOfRange`, `InvalidAltitude`, `InvalidTimestamp`,
///   `InvalidTimeWindow` - semantic checks failed
pub fn parse_envelope(
    verified: &VerifiedArtifact<'_>,
    expected_uin: Option<&str>,
) -> Result<FlightEnvelope, ArtifactError> {
    let text = std::str::from_utf8(verified.payload)
        .map_err(|e| ArtifactError::Malformed(format!("payload is not UTF-8: {e}")))?;
    let raw: RawArtifact =
        serde_json::from_str(text).map_err(|e| ArtifactError::Malformed(e.to_string()))?;

    let signer = verified.signer.issuer_id();
    if let Some(declared) = raw.issuer.as_deref() {
        if declared != signer {
            return Err(ArtifactError::IssuerMismatch {
                declared: declared.to_string(),
                signer: signer.to_string(),
            });
        }
    }

    let declared_uin = raw.ua_details.and_then(|ua| ua.uin_no);
    if let (Some(expected), Some(declared)) = (expected_uin, declared_uin.as_deref()) {
        if expected != declared {
            return Err(ArtifactError::AircraftMismatch {
                expected: expected.to_string(),
                declared: declared.to_string(),
            });
        }
    }

    let params = raw
        .flight_parameters
        .ok_or(ArtifactError::MissingField("flightParameters"))?;
    let coordinates = params
        .coordinates
        .ok_or(ArtifactError::MissingField("coordinates"))?;
    let max_altitude = params
        .max_altitude
        .ok_or(ArtifactError::MissingField("maxAltitude"))?;
    let valid_from = params
        .flight_start_time
        .ok_or(ArtifactError::MissingField("flightStartTime"))?
        .to_timestamp("flightStartTime")?;
    let valid_until = params
        .flight_end_time
        .ok_or(ArtifactError::MissingField("flightEndTime"))?
        .to_timestamp("flightEndTime")?;

    let fence = Fence::new(&coordinates)?;
    let envelope = FlightEnvelope::new(fence, max_altitude, valid_from, valid_until, signer)?;

    Ok(envelope.with_metadata(ArtifactMetadata {
        artifact_id: raw.permission_artifact_id,
        aircraft_uin: declared_uin,
        flight_purpose: params.flight_purpose,
        payload_sha256: Some(hex::encode(verified.payload_digest())),
    }))
}
