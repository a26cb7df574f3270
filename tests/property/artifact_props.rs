//! The artifact decoder rejects damage instead of panicking.

use djibly::store::from_bytes;
use djibly::DjiblyError;
use proptest::prelude::*;
use std::sync::LazyLock;

use crate::common::TWO_PRODUCT_PIPELINE;

static ARTIFACT: LazyLock<Vec<u8>> =
    LazyLock::new(|| djibly::binary::encode(&TWO_PRODUCT_PIPELINE).expect("encode"));

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = from_bytes(&bytes);
    }

    #[test]
    fn prop_bit_flip_is_corrupt(index in any::<prop::sample::Index>(), bit in 0u8..8) {
        let mut bytes = ARTIFACT.clone();
        let i = index.index(bytes.len());
        bytes[i] ^= 1 << bit;
        let result = from_bytes(&bytes);
        prop_assert!(
            matches!(result, Err(DjiblyError::ArtifactCorrupt { .. })),
            "flip at byte {} bit {} was accepted",
            i,
            bit
        );
    }

    #[test]
    fn prop_truncation_is_corrupt(cut in 0usize..4096) {
        let len = ARTIFACT.len();
        let keep = cut % len;
        let result = from_bytes(&ARTIFACT[..keep]);
        prop_assert!(matches!(result, Err(DjiblyError::ArtifactCorrupt { .. })), "expected ArtifactCorrupt, got {:?}", result);
    }

    #[test]
    fn prop_trailing_bytes_are_corrupt(extra in prop::collection::vec(any::<u8>(), 1..32)) {
        let mut bytes = ARTIFACT.clone();
        bytes.extend_from_slice(&extra);
        prop_assert!(from_bytes(&bytes).is_err());
    }
}
