//! # Engine Configuration
//!
//! Trust anchors, airframe binding and reporting options for a handle.
//!
//! With the `toml-config` feature the configuration can be loaded from a
//! file:
//!
//! ```toml
//! aircraft_uin = "UIN0001"
//! breach_response = "advise_landing"
//! artifact_encoding = "base64"
//!
//! [[trust_anchors]]
//! issuer_id = "DGCA"
//! algorithm = "ed25519"
//! public_key = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
//! ```

use crate::domain::errors::ConfigError;
use crate::domain::signature::{SignatureAlgorithm, TrustAnchor, TrustStore};
pub use crate::domain::state_machine::BreachResponse;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Transport encoding of submitted artifact bundles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactEncoding {
    /// Bundle JSON as-is
    #[default]
    Raw,
    /// Bundle JSON wrapped in base64 text
    Base64,
}

/// One trusted authority key as written in configuration.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAnchorConfig {
    /// Authority identity recorded in accepted envelopes
    pub issuer_id: String,
    /// Key algorithm
    pub algorithm: SignatureAlgorithm,
    /// Public key bytes, hex encoded
    #[serde_as(as = "Hex")]
    pub public_key: Vec<u8>,
}

impl TrustAnchorConfig {
    /// Ed25519 anchor from raw key bytes.
    pub fn ed25519(issuer_id: impl Into<String>, public_key: [u8; 32]) -> Self {
        Self {
            issuer_id: issuer_id.into(),
            algorithm: SignatureAlgorithm::Ed25519,
            public_key: public_key.to_vec(),
        }
    }

    /// Decode into a [`TrustAnchor`].
    pub fn to_anchor(&self) -> Result<TrustAnchor, ConfigError> {
        TrustAnchor::from_key_bytes(self.issuer_id.clone(), self.algorithm, &self.public_key)
    }
}

/// Configuration of one [`NpntHandle`](crate::NpntHandle).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Authorities whose artifacts are accepted
    pub trust_anchors: Vec<TrustAnchorConfig>,

    /// When set, artifacts naming another airframe are rejected.
    pub aircraft_uin: Option<String>,

    /// What the tick report signals while airborne with a breach.
    pub breach_response: BreachResponse,

    /// Encoding assumed by `submit_bundle`.
    pub artifact_encoding: ArtifactEncoding,
}

impl EngineConfig {
    /// Config for tests: no anchors, landing advice on.
    pub fn for_testing() -> Self {
        Self {
            trust_anchors: Vec::new(),
            aircraft_uin: None,
            breach_response: BreachResponse::AdviseLanding,
            artifact_encoding: ArtifactEncoding::Raw,
        }
    }

    /// Add a trust anchor.
    pub fn with_trust_anchor(mut self, anchor: TrustAnchorConfig) -> Self {
        self.trust_anchors.push(anchor);
        self
    }

    /// Bind to one airframe.
    pub fn with_aircraft_uin(mut self, uin: impl Into<String>) -> Self {
        self.aircraft_uin = Some(uin.into());
        self
    }

    /// Decode every anchor into a [`TrustStore`].
    ///
    /// # Errors
    /// * `InvalidPublicKey` - wrong length or not a valid curve point
    /// * `DuplicateIssuer` - two anchors share an issuer id
    pub fn validate(&self) -> Result<TrustStore, ConfigError> {
        self.trust_anchors
            .iter()
            .try_fold(TrustStore::new(), |store, anchor| {
                store.with_anchor(anchor.to_anchor()?)
            })
    }
}

#[cfg(feature = "toml-config")]
mod toml_config {
    use super::EngineConfig;
    use crate::domain::errors::ConfigError;
    use std::fs;
    use std::path::Path;

    impl EngineConfig {
        /// Parse TOML configuration text.
        pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
        }

        /// Load configuration from a TOML file.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;
            Self::from_toml_str(&content)
        }
    }
}
