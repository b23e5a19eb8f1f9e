//! Fuzz target for transport bundle decoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/npnt-core
//! cargo +nightly fuzz run fuzz_bundle_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use npnt_core::{ArtifactEncoding, PermissionArtifact};

fuzz_target!(|data: &[u8]| {
    for encoding in [ArtifactEncoding::Raw, ArtifactEncoding::Base64] {
        // Must never panic
        if let Ok(artifact) = PermissionArtifact::from_bundle(data, encoding) {
            // Anything accepted re-encodes to an equivalent bundle
            let text = artifact
                .to_bundle(encoding)
                .expect("re-encoding a decoded bundle");
            let again = PermissionArtifact::from_bundle(text.as_bytes(), encoding)
                .expect("decoding a re-encoded bundle");
            assert_eq!(again, artifact);
        }
    }
});
