//! Property tests for the pure transforms.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use proptest::prelude::*;
use std::collections::HashSet;
use veritas_core::encoder::strip_data_url_prefix;
use veritas_core::normalize::extract_sources;
use veritas_core::{GroundingReference, InputState};

proptest! {
    #[test]
    fn encoded_bytes_never_carry_a_header(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = STANDARD.encode(&bytes);
        let stripped = strip_data_url_prefix(&encoded);

        prop_assert!(!stripped.starts_with("data:"));
        prop_assert_eq!(stripped, encoded.as_str());
    }

    #[test]
    fn strip_is_idempotent(mime in "[a-z]{1,8}/[a-z0-9.+-]{1,12}", bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let payload = STANDARD.encode(&bytes);
        let data_url = format!("data:{};base64,{}", mime, payload);

        let once = strip_data_url_prefix(&data_url);
        prop_assert_eq!(once, payload.as_str());
        prop_assert_eq!(strip_data_url_prefix(once), once);
    }

    #[test]
    fn sources_are_unique_and_first_seen(refs in proptest::collection::vec((0u8..5, 0u8..5), 0..20)) {
        let grounding: Vec<GroundingReference> = refs
            .iter()
            .map(|(title, url)| GroundingReference::new(format!("t{}", title), format!("http://{}", url)))
            .collect();

        let sources = extract_sources(&grounding);

        let urls: HashSet<_> = sources.iter().map(|s| s.url.as_str()).collect();
        prop_assert_eq!(urls.len(), sources.len());

        for source in &sources {
            let first = grounding
                .iter()
                .find(|g| g.uri.as_deref() == Some(source.url.as_str()))
                .unwrap();
            prop_assert_eq!(first.title.as_deref(), Some(source.title.as_str()));
        }

        let mut expected_order = Vec::new();
        for g in &grounding {
            let url = g.uri.clone().unwrap();
            if !expected_order.contains(&url) {
                expected_order.push(url);
            }
        }
        let actual_order: Vec<_> = sources.iter().map(|s| s.url.clone()).collect();
        prop_assert_eq!(actual_order, expected_order);
    }

    #[test]
    fn blank_input_has_no_content(text in "[ \t\n]{0,8}", url in "[ \t\n]{0,8}") {
        let input = InputState::new().with_text(text).with_url(url);
        prop_assert!(!input.has_content());
    }
}
