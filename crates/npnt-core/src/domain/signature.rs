//! # Signature Verifier
//!
//! Authenticates raw artifact bytes against the configured trust anchors.
//! Pure function of its inputs: it never looks inside the payload.
//!
//! ## Supported Algorithms
//!
//! - **Ed25519**: 32-byte key, 64-byte signature over the payload bytes,
//!   strict verification (rejects small-order keys and non-canonical S)
//! - **ECDSA secp256k1 / SHA-256**: SEC1 key (33 or 65 bytes), signature as
//!   64-byte `r || s` or DER. High-S signatures are rejected by k256, so a
//!   signature cannot be made malleable into a second valid encoding.

use super::errors::{ConfigError, SignatureError};
use k256::ecdsa::signature::Verifier as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Signature algorithm of a trust anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    /// Ed25519 (RFC 8032)
    Ed25519,
    /// ECDSA over secp256k1 with SHA-256 message digest
    EcdsaSecp256k1,
}

/// A decoded authority public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorityKey {
    /// Ed25519 verifying key
    Ed25519(ed25519_dalek::VerifyingKey),
    /// secp256k1 verifying key
    EcdsaSecp256k1(k256::ecdsa::VerifyingKey),
}

impl AuthorityKey {
    /// Decode key bytes for `algorithm`.
    pub fn from_bytes(algorithm: SignatureAlgorithm, bytes: &[u8]) -> Result<Self, String> {
        match algorithm {
            SignatureAlgorithm::Ed25519 => {
                let raw: &[u8; 32] = bytes
                    .try_into()
                    .map_err(|_| format!("expected 32 bytes, got {}", bytes.len()))?;
                ed25519_dalek::VerifyingKey::from_bytes(raw)
                    .map(AuthorityKey::Ed25519)
                    .map_err(|e| e.to_string())
            }
            SignatureAlgorithm::EcdsaSecp256k1 => k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(AuthorityKey::EcdsaSecp256k1)
                .map_err(|e| e.to_string()),
        }
    }

    /// Algorithm of this key.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            AuthorityKey::Ed25519(_) => SignatureAlgorithm::Ed25519,
            AuthorityKey::EcdsaSecp256k1(_) => SignatureAlgorithm::EcdsaSecp256k1,
        }
    }

    /// Check `signature` over `payload`.
    ///
    /// `Err(MalformedSignature)` when the bytes are not a valid encoding for
    /// this key's algorithm, `Ok(false)` when well formed but not matching.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<bool, SignatureError> {
        match self {
            AuthorityKey::Ed25519(key) => {
                let sig = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|_| SignatureError::MalformedSignature)?;
                Ok(key.verify_strict(payload, &sig).is_ok())
            }
            AuthorityKey::EcdsaSecp256k1(key) => {
                let sig = parse_ecdsa_signature(signature)?;
                Ok(key.verify(payload, &sig).is_ok())
            }
        }
    }
}

/// Parse a fixed-width `r || s` or DER encoded secp256k1 signature.
fn parse_ecdsa_signature(bytes: &[u8]) -> Result<k256::ecdsa::Signature, SignatureError> {
    let parsed = if bytes.len() == 64 {
        k256::ecdsa::Signature::from_slice(bytes)
    } else {
        k256::ecdsa::Signature::from_der(bytes)
    };
    parsed.map_err(|_| SignatureError::MalformedSignature)
}

// =============================================================================
// TRUST ANCHORS
// =============================================================================

/// A trusted authority: identity plus verifying key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustAnchor {
    issuer_id: String,
    key: AuthorityKey,
}

impl TrustAnchor {
    /// Create an anchor from an already decoded key.
    pub fn new(issuer_id: impl Into<String>, key: AuthorityKey) -> Self {
        Self {
            issuer_id: issuer_id.into(),
            key,
        }
    }

    /// Create an anchor from raw key bytes.
    pub fn from_key_bytes(
        issuer_id: impl Into<String>,
        algorithm: SignatureAlgorithm,
        key_bytes: &[u8],
    ) -> Result<Self, ConfigError> {
        let issuer_id = issuer_id.into();
        let key = AuthorityKey::from_bytes(algorithm, key_bytes).map_err(|reason| {
            ConfigError::InvalidPublicKey {
                issuer_id: issuer_id.clone(),
                reason,
            }
        })?;
        Ok(Self { issuer_id, key })
    }

    /// Authority identity recorded in accepted envelopes.
    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    /// Verifying key.
    pub fn key(&self) -> &AuthorityKey {
        &self.key
    }
}

/// Ordered set of trust anchors with unique issuer ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrustStore {
    anchors: Vec<TrustAnchor>,
}

impl TrustStore {
    /// Empty store; verifies nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an anchor.
    ///
    /// # Errors
    /// * `DuplicateIssuer` - an anchor with this issuer id already exists
    pub fn add(&mut self, anchor: TrustAnchor) -> Result<(), ConfigError> {
        if self.anchors.iter().any(|a| a.issuer_id == anchor.issuer_id) {
            return Err(ConfigError::DuplicateIssuer(anchor.issuer_id));
        }
        self.anchors.push(anchor);
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_anchor(mut self, anchor: TrustAnchor) -> Result<Self, ConfigError> {
        self.add(anchor)?;
        Ok(self)
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no anchor is configured.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Anchors in configuration order.
    pub fn anchors(&self) -> &[TrustAnchor] {
        &self.anchors
    }
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Authenticate `payload` under `signature` against every anchor in `store`.
///
/// Returns the anchor whose key produced a match.
///
/// # Errors
/// * `NoTrustAnchors` - the store is empty
/// * `MalformedSignature` - the signature is not a valid encoding for any
///   configured algorithm
/// * `UntrustedSigner` - well formed, but no anchor key matches
pub fn verify_artifact_signature<'a>(
    payload: &[u8],
    signature: &[u8],
    store: &'a TrustStore,
) -> Result<&'a TrustAnchor, SignatureError> {
    if store.is_empty() {
        return Err(SignatureError::NoTrustAnchors);
    }

    let mut well_formed = false;
    for anchor in store.anchors() {
        match anchor.key.verify(payload, signature) {
            Ok(true) => {
                debug!(issuer = %anchor.issuer_id, "Artifact signature verified");
                return Ok(anchor);
            }
            Ok(false) => well_formed = true,
            Err(_) => {}
        }
    }

    if well_formed {
        Err(SignatureError::UntrustedSigner)
    } else {
        Err(SignatureError::MalformedSignature)
    }
}
