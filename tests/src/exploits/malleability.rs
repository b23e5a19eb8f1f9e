//! # Signature Malleability
//!
//! Corrupted or re-encoded signatures must never authenticate.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use k256::ecdsa::{signature::Signer as _, Signature, SigningKey};
    use npnt_core::{
        EngineConfig, NpntHandle, PermissionApi, PermissionArtifact, PermissionError,
        RejectionReason, SignatureAlgorithm, SignatureError, TrustAnchorConfig,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_random_bit_flips_never_verify() {
        let mut rng = StdRng::seed_from_u64(0x4e504e54);
        let genuine = square_artifact();
        let mut handle = handle();

        for _ in 0..200 {
            let mut artifact = genuine.clone();
            let target = if rng.gen_bool(0.5) {
                &mut artifact.payload
            } else {
                &mut artifact.signature
            };
            let index = rng.gen_range(0..target.len());
            target[index] ^= 1 << rng.gen_range(0..8);

            let err = handle.submit_artifact(&artifact).unwrap_err();
            assert_eq!(err.reason(), RejectionReason::InvalidAuth);
        }
        assert_eq!(handle.permission_cycle(), 0);
    }

    #[test]
    fn test_truncated_and_garbage_signatures() {
        let genuine = square_artifact();
        let mut handle = handle();

        let mut extended = genuine.signature.clone();
        extended.push(0);
        let cases = [
            Vec::new(),
            genuine.signature[..63].to_vec(),
            extended,
            vec![0xff; 64],
        ];
        for signature in cases {
            let artifact = PermissionArtifact::new(genuine.payload.clone(), signature);
            let err = handle.submit_artifact(&artifact).unwrap_err();
            assert_eq!(err.reason(), RejectionReason::InvalidAuth);
        }

        let err = handle
            .submit_artifact(&PermissionArtifact::new(genuine.payload.clone(), Vec::new()))
            .unwrap_err();
        assert_eq!(err, PermissionError::InvalidAuth(SignatureError::MalformedSignature));
    }

    #[test]
    fn test_high_s_ecdsa_signature_rejected() {
        let key = SigningKey::from_slice(&[0x37; 32]).unwrap();
        let config = EngineConfig::for_testing().with_trust_anchor(TrustAnchorConfig {
            issuer_id: AUTHORITY.to_string(),
            algorithm: SignatureAlgorithm::EcdsaSecp256k1,
            public_key: key
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        });
        let mut handle = NpntHandle::new(config).unwrap();

        let payload = serde_json::to_vec(&square_payload()).unwrap();
        let low: Signature = key.sign(&payload);
        let (r, s) = low.split_scalars();
        let high = Signature::from_scalars(k256::FieldBytes::from(r), (-*s).to_bytes()).unwrap();
        assert!(high.normalize_s().is_some());

        for encoded in [high.to_bytes().to_vec(), high.to_der().as_bytes().to_vec()] {
            let err = handle
                .submit_artifact(&PermissionArtifact::new(payload.clone(), encoded))
                .unwrap_err();
            assert_eq!(err.reason(), RejectionReason::InvalidAuth);
        }

        let genuine = PermissionArtifact::new(payload, low.to_bytes().to_vec());
        assert!(handle.submit_artifact(&genuine).is_ok());
    }

    #[test]
    fn test_ed25519_signature_presented_to_ecdsa_anchor() {
        let key = SigningKey::from_slice(&[0x37; 32]).unwrap();
        let config = EngineConfig::for_testing().with_trust_anchor(TrustAnchorConfig {
            issuer_id: AUTHORITY.to_string(),
            algorithm: SignatureAlgorithm::EcdsaSecp256k1,
            public_key: key
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        });
        let mut handle = NpntHandle::new(config).unwrap();

        let err = handle.submit_artifact(&square_artifact()).unwrap_err();
        assert_eq!(err.reason(), RejectionReason::InvalidAuth);
    }
}
