//! # Codec Adapter
//!
//! Transport decoding of permission artifacts.
//!
//! A bundle is a JSON object carrying the signed payload and its detached
//! signature, both base64 (STANDARD alphabet, padded):
//!
//! ```json
//! { "payload": "eyJmbGlnaHRQYXJhbWV0ZXJzIjp7Li4ufX0=", "signature": "..." }
//! ```
//!
//! With [`ArtifactEncoding::Base64`] the bundle text itself is base64
//! wrapped. Only the framing is read here; the payload stays opaque until
//! it has been authenticated.

use crate::config::ArtifactEncoding;
use crate::domain::artifact::PermissionArtifact;
use crate::domain::errors::CodecError;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Wire form of a permission artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactBundle {
    /// Base64 payload bytes
    pub payload: String,
    /// Base64 detached signature
    pub signature: String,
}

fn decode_field(field: &'static str, text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| CodecError::InvalidBase64 {
            field,
            reason: e.to_string(),
        })
}

impl PermissionArtifact {
    /// Decode base64 payload and signature.
    pub fn from_base64(payload: &str, signature: &str) -> Result<Self, CodecError> {
        Ok(Self::new(
            decode_field("payload", payload)?,
            decode_field("signature", signature)?,
        ))
    }

    /// Decode a transport bundle.
    ///
    /// # Errors
    /// * `InvalidBase64` - outer wrapping or a field is not valid base64
    /// * `MalformedBundle` - not a `{"payload", "signature"}` object
    pub fn from_bundle(bytes: &[u8], encoding: ArtifactEncoding) -> Result<Self, CodecError> {
        let unwrapped;
        let json = match encoding {
            ArtifactEncoding::Raw => bytes,
            ArtifactEncoding::Base64 => {
                let text: Vec<u8> = bytes
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                unwrapped = STANDARD
                    .decode(text)
                    .map_err(|e| CodecError::InvalidBase64 {
                        field: "bundle",
                        reason: e.to_string(),
                    })?;
                unwrapped.as_slice()
            }
        };

        let bundle: ArtifactBundle = serde_json::from_slice(json)
            .map_err(|e| CodecError::MalformedBundle(e.to_string()))?;
        Self::from_base64(&bundle.payload, &bundle.signature)
    }

    /// Encode as a bundle, the inverse of [`from_bundle`](Self::from_bundle).
    pub fn to_bundle(&self, encoding: ArtifactEncoding) -> Result<String, CodecError> {
        let bundle = ArtifactBundle {
            payload: STANDARD.encode(&self.payload),
            signature: STANDARD.encode(&self.signature),
        };
        let json = serde_json::to_string(&bundle)
            .map_err(|e| CodecError::MalformedBundle(e.to_string()))?;
        Ok(match encoding {
            ArtifactEncoding::Raw => json,
            ArtifactEncoding::Base64 => STANDARD.encode(json),
        })
    }
}
