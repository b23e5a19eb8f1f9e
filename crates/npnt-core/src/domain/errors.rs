//! # Permission Errors
//!
//! Error types for artifact decoding, authentication, parsing and
//! aircraft state transitions.
//!
//! Breach conditions are deliberately absent: a breach is state, reported
//! through [`BreachFlags`](super::entities::BreachFlags), never an error.

use super::state_machine::{AircraftEvent, AircraftState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the transport codec (base64 and bundle framing).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A base64 field could not be decoded
    #[error("Invalid base64 in {field}: {reason}")]
    InvalidBase64 {
        /// Which part of the artifact was being decoded
        field: &'static str,
        /// Decoder message
        reason: String,
    },

    /// The bundle is not a `{"payload", "signature"}` object
    #[error("Malformed artifact bundle: {0}")]
    MalformedBundle(String),
}

/// Errors that can occur while authenticating an artifact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// No trust anchor is configured, so nothing can be authenticated
    #[error("No trust anchors configured")]
    NoTrustAnchors,

    /// The signature bytes are not a valid encoding for any configured algorithm
    #[error("Malformed signature encoding")]
    MalformedSignature,

    /// The signature is well formed but matches no trusted authority key
    #[error("Artifact not signed by a trusted authority")]
    UntrustedSigner,

    /// The payload names an issuer other than the authority that signed it
    #[error("Issuer mismatch: artifact declares {declared:?}, signed by {signer:?}")]
    IssuerMismatch {
        /// Issuer declared inside the payload
        declared: String,
        /// Issuer id of the verifying trust anchor
        signer: String,
    },
}

/// Errors raised while parsing and validating an authenticated payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArtifactError {
    /// Transport decoding failed before authentication
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Payload is not the expected JSON structure
    #[error("Malformed artifact: {0}")]
    Malformed(String),

    /// A mandatory field is absent
    #[error("Missing mandatory field: {0}")]
    MissingField(&'static str),

    /// The fence has fewer than three distinct vertices
    #[error("Fence needs at least 3 distinct vertices, got {distinct}")]
    TooFewVertices {
        /// Number of distinct vertices found
        distinct: usize,
    },

    /// A fence vertex lies outside valid latitude/longitude ranges
    #[error("Vertex {index} out of range: ({latitude}, {longitude})")]
    CoordinateOutOfRange {
        /// Position of the vertex in the artifact
        index: usize,
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Altitude ceiling is negative or not finite
    #[error("Invalid altitude ceiling: {0}")]
    InvalidAltitude(f64),

    /// A time field could not be interpreted as a UTC instant
    #[error("Invalid timestamp in {field}: {reason}")]
    InvalidTimestamp {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Validity window is empty or reversed
    #[error("Invalid time window: {valid_from} >= {valid_until}")]
    InvalidTimeWindow {
        /// Window start (epoch seconds)
        valid_from: u64,
        /// Window end (epoch seconds)
        valid_until: u64,
    },

    /// Artifact names an issuer other than its signer
    #[error("Issuer mismatch: artifact declares {declared:?}, signed by {signer:?}")]
    IssuerMismatch {
        /// Issuer declared inside the payload
        declared: String,
        /// Issuer id of the verifying trust anchor
        signer: String,
    },

    /// Artifact is bound to a different airframe
    #[error("Artifact issued for aircraft {declared:?}, this aircraft is {expected:?}")]
    AircraftMismatch {
        /// Configured UIN of this aircraft
        expected: String,
        /// UIN named by the artifact
        declared: String,
    },
}

impl ArtifactError {
    /// Whether this error means "structurally valid but missing a mandatory part".
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            ArtifactError::MissingField(_) | ArtifactError::TooFewVertices { .. }
        )
    }
}

/// Reason code attached to a rejected artifact submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Cannot be parsed as the expected structure, or semantically invalid
    InvalidArtifact,
    /// Structurally valid but missing a mandatory field
    IncompleteArtifact,
    /// Signed by an unauthorised entity (or not validly signed at all)
    InvalidAuth,
    /// Cannot be set up in the current aircraft state
    InvalidState,
}

impl RejectionReason {
    /// Stable identifier for logs and operator output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::InvalidArtifact => "invalid_artifact",
            RejectionReason::IncompleteArtifact => "incomplete_artifact",
            RejectionReason::InvalidAuth => "invalid_auth",
            RejectionReason::InvalidState => "invalid_state",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a submitted permission artifact.
///
/// Whatever the variant, the handle's envelope, breach flags and state are
/// exactly what they were before the submission.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PermissionError {
    /// Invalid artifact
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(ArtifactError),

    /// Incomplete artifact
    #[error("Incomplete artifact: {0}")]
    IncompleteArtifact(ArtifactError),

    /// Signed by an unauthorised entity
    #[error("Unauthorised artifact: {0}")]
    InvalidAuth(SignatureError),

    /// Not applicable in the current aircraft state
    #[error("Artifact cannot be set up while aircraft is {state}")]
    InvalidState {
        /// State at the time of submission
        state: AircraftState,
    },
}

impl PermissionError {
    /// The reason code for this rejection.
    pub fn reason(&self) -> RejectionReason {
        match self {
            PermissionError::InvalidArtifact(_) => RejectionReason::InvalidArtifact,
            PermissionError::IncompleteArtifact(_) => RejectionReason::IncompleteArtifact,
            PermissionError::InvalidAuth(_) => RejectionReason::InvalidAuth,
            PermissionError::InvalidState { .. } => RejectionReason::InvalidState,
        }
    }
}

impl From<SignatureError> for PermissionError {
    fn from(err: SignatureError) -> Self {
        PermissionError::InvalidAuth(err)
    }
}

impl From<CodecError> for PermissionError {
    fn from(err: CodecError) -> Self {
        PermissionError::InvalidArtifact(ArtifactError::Codec(err))
    }
}

impl From<ArtifactError> for PermissionError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::IssuerMismatch { declared, signer } => {
                PermissionError::InvalidAuth(SignatureError::IssuerMismatch { declared, signer })
            }
            e if e.is_incomplete() => PermissionError::IncompleteArtifact(e),
            e => PermissionError::InvalidArtifact(e),
        }
    }
}

/// An aircraft event that is not valid in the current state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionError {
    /// The event has no transition from the current state
    #[error("{event} not permitted while {state}")]
    NotPermitted {
        /// Rejected event
        event: AircraftEvent,
        /// State the machine stayed in
        state: AircraftState,
    },

    /// Arm requested while the permission gate is closed
    #[error("Arming denied: no valid, unbreached permission")]
    ArmingDenied,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A trust anchor key could not be decoded or is not a valid curve point
    #[error("Invalid public key for issuer {issuer_id:?}: {reason}")]
    InvalidPublicKey {
        /// Issuer whose key is bad
        issuer_id: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two trust anchors share an issuer id
    #[error("Duplicate trust anchor for issuer {0:?}")]
    DuplicateIssuer(String),

    /// Configuration file could not be read
    #[error("Failed to read config {path}: {error}")]
    Io {
        /// Path of the file that failed to load
        path: String,
        /// Error message from the I/O operation
        error: String,
    },

    /// Configuration text could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),
}
