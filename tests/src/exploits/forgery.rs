//! # Forged Artifacts
//!
//! Every forgery must be rejected with `InvalidAuth` and leave the envelope
//! in force untouched.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use npnt_core::{
        ArtifactEncoding, NpntHandle, PermissionApi, PermissionArtifact, PermissionError,
        RejectionReason, SignatureError, TrustAnchorConfig,
    };
    use std::sync::Arc;

    /// Submit `artifact` to a handle already holding the square envelope and
    /// check nothing changed.
    fn assert_rejected_without_effect(artifact: &PermissionArtifact) -> PermissionError {
        let mut handle = handle();
        let original = handle.submit_artifact(&square_artifact()).unwrap();
        handle.evaluate(inside());
        let flags = handle.breach_flags();

        let err = handle.submit_artifact(artifact).unwrap_err();

        let current = handle.envelope().unwrap();
        assert!(Arc::ptr_eq(&original, &current));
        assert_eq!(handle.permission_cycle(), 1);
        assert_eq!(handle.breach_flags(), flags);
        assert!(handle.arming_permitted());
        err
    }

    #[test]
    fn test_widened_fence_after_signing() {
        let genuine = square_artifact();
        let widened = serde_json::to_vec(&payload(
            &[(0.0, 0.0), (0.0, 50.0), (50.0, 50.0), (50.0, 0.0)],
            MAX_ALT,
            T0,
            T0 + WINDOW,
        ))
        .unwrap();

        let forged = PermissionArtifact::new(widened, genuine.signature.clone());
        let err = assert_rejected_without_effect(&forged);
        assert_eq!(err, PermissionError::InvalidAuth(SignatureError::UntrustedSigner));
    }

    #[test]
    fn test_raised_ceiling_after_signing() {
        let mut tampered = square_payload();
        tampered["flightParameters"]["maxAltitude"] = 400.0.into();
        let forged = PermissionArtifact::new(
            serde_json::to_vec(&tampered).unwrap(),
            square_artifact().signature,
        );
        assert_eq!(
            assert_rejected_without_effect(&forged).reason(),
            RejectionReason::InvalidAuth
        );
    }

    #[test]
    fn test_trailing_bytes_after_signing() {
        let mut artifact = square_artifact();
        artifact.payload.push(b' ');
        assert_eq!(
            assert_rejected_without_effect(&artifact).reason(),
            RejectionReason::InvalidAuth
        );
    }

    #[test]
    fn test_self_signed_artifact() {
        let forged = sign_with(&rogue_key(), &square_payload());
        let err = assert_rejected_without_effect(&forged);
        assert_eq!(err, PermissionError::InvalidAuth(SignatureError::UntrustedSigner));
    }

    #[test]
    fn test_signature_spliced_from_other_artifact() {
        let other = sign_with(
            &authority_key(),
            &payload(&SQUARE, MAX_ALT, T0 + WINDOW, T0 + 2 * WINDOW),
        );
        let spliced = PermissionArtifact::new(square_artifact().payload, other.signature);
        assert_eq!(
            assert_rejected_without_effect(&spliced).reason(),
            RejectionReason::InvalidAuth
        );
    }

    #[test]
    fn test_trusted_key_claiming_other_issuer() {
        // A second, lesser authority signs an artifact claiming to be DGCA
        let config = config().with_trust_anchor(TrustAnchorConfig::ed25519(
            "TRAINING",
            rogue_key().verifying_key().to_bytes(),
        ));
        let mut handle = NpntHandle::new(config).unwrap();

        let err = handle
            .submit_artifact(&sign_with(&rogue_key(), &square_payload()))
            .unwrap_err();
        assert_eq!(
            err,
            PermissionError::InvalidAuth(SignatureError::IssuerMismatch {
                declared: AUTHORITY.to_string(),
                signer: "TRAINING".to_string(),
            })
        );
        assert!(handle.envelope().is_none());
    }

    #[test]
    fn test_handle_without_anchors_rejects_everything() {
        let mut handle = NpntHandle::new(npnt_core::EngineConfig::for_testing()).unwrap();
        let err = handle.submit_artifact(&square_artifact()).unwrap_err();
        assert_eq!(err, PermissionError::InvalidAuth(SignatureError::NoTrustAnchors));
    }

    #[test]
    fn test_bundle_with_smuggled_field() {
        let mut handle = handle();
        let bundle = square_artifact().to_bundle(ArtifactEncoding::Raw).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&bundle).unwrap();
        value["maxAltitude"] = 1000.into();

        let err = handle
            .submit_bundle(value.to_string().as_bytes())
            .unwrap_err();
        assert_eq!(err.reason(), RejectionReason::InvalidArtifact);
        assert!(handle.envelope().is_none());
    }
}
