//! Attribute-driven match orchestration.

use crate::compare::compare_attributes;
use doppel_core::types::{ConfidenceLabel, ProductDescriptor, TopMatch};
use doppel_llm::AttributeExtractor;
use tracing::debug;

/// Maximum number of matches returned by [`ProductMatcher::find_top_matches`].
pub const TOP_MATCH_LIMIT: usize = 3;

/// Verdict for a single product pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseMatch {
    pub confidence_label: ConfidenceLabel,
}

/// Orchestrates attribute extraction and comparison over product text.
///
/// Every candidate costs one extraction call; there is no caching and
/// no batching, so callers ranking a large catalog pay O(N) provider
/// calls.
#[derive(Clone)]
pub struct ProductMatcher {
    extractor: AttributeExtractor,
}

impl ProductMatcher {
    /// Create a matcher over a shared extractor.
    pub fn new(extractor: AttributeExtractor) -> Self {
        Self { extractor }
    }

    /// Compare two product texts and label the pair.
    ///
    /// Extraction failures degrade to unknown attributes, so the worst
    /// outcome is a low-similarity label, never an error.
    pub async fn match_products(&self, text_a: &str, text_b: &str) -> PairwiseMatch {
        let attr_a = self.extractor.extract(text_a).await;
        let attr_b = self.extractor.extract(text_b).await;
        let report = compare_attributes(&attr_a, &attr_b);

        PairwiseMatch {
            confidence_label: report.confidence_label,
        }
    }

    /// Rank candidates against a new product's text.
    ///
    /// The new text is extracted once, each candidate once, in input
    /// order. Results are sorted by score descending with ties keeping
    /// candidate order, then cut to [`TOP_MATCH_LIMIT`].
    pub async fn find_top_matches(
        &self,
        new_text: &str,
        candidates: &[ProductDescriptor],
    ) -> Vec<TopMatch> {
        debug!(
            "Ranking {} candidates via {} extraction",
            candidates.len(),
            self.extractor.backend_name()
        );

        let attr_new = self.extractor.extract(new_text).await;
        let mut matches = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let attr_existing = self.extractor.extract(&candidate.matching_text()).await;
            let report = compare_attributes(&attr_new, &attr_existing);

            matches.push(TopMatch {
                existing_product_id: candidate.id,
                name: candidate.name.clone(),
                similarity_score: report.similarity_score,
            });
        }

        // Stable sort: equal scores keep candidate order
        matches.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(TOP_MATCH_LIMIT);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppel_llm::MockBackend;
    use std::sync::Arc;

    const FULL: &str = r#"{"brand": "Scholar", "item_type": "geometry box",
        "size": "standard", "quantity": "1", "packaging": "box",
        "target_users": "school", "purpose": "geometry drawing"}"#;

    const SIX_OF_SEVEN: &str = r#"{"brand": "Scholar", "item_type": "geometry box",
        "size": "compact", "quantity": "1", "packaging": "box",
        "target_users": "school", "purpose": "geometry drawing"}"#;

    const FIVE_OF_SEVEN: &str = r#"{"brand": "Scholar", "item_type": "geometry box",
        "size": "compact", "quantity": "2", "packaging": "box",
        "target_users": "school", "purpose": "geometry drawing"}"#;

    const ALL_NULL: &str = r#"{"brand": null, "item_type": null, "size": null,
        "quantity": null, "packaging": null, "target_users": null,
        "purpose": null}"#;

    fn matcher(backend: MockBackend) -> ProductMatcher {
        ProductMatcher::new(AttributeExtractor::new(Arc::new(backend)))
    }

    fn descriptor(id: i64, name: &str) -> ProductDescriptor {
        ProductDescriptor::new(id, name, None)
    }

    #[tokio::test]
    async fn test_matching_pair_is_high_confidence() {
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_response("Aristo", FULL);
        let m = matcher(backend);

        let result = m
            .match_products("Scholar Geometry Box", "Aristo Geometry Set")
            .await;
        assert_eq!(
            result.confidence_label,
            ConfidenceLabel::HighConfidenceDuplicate
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_degrades_to_low() {
        // One side extracts fine, the other errors out; unknown
        // attributes match nothing.
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_failure("Aristo");
        let m = matcher(backend);

        let result = m
            .match_products("Scholar Geometry Box", "Aristo Geometry Set")
            .await;
        assert_eq!(result.confidence_label, ConfidenceLabel::LowNewProduct);
    }

    #[tokio::test]
    async fn test_top_matches_sorted_and_truncated() {
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_response("Aristo", FULL)
            .with_response("Brilliant", SIX_OF_SEVEN)
            .with_response("Classic", FIVE_OF_SEVEN)
            .with_response("Doodle", ALL_NULL);
        let m = matcher(backend);

        let candidates = vec![
            descriptor(1, "Doodle Crayons"),
            descriptor(2, "Classic Geometry Box"),
            descriptor(3, "Aristo Geometry Box"),
            descriptor(4, "Brilliant Geometry Box"),
        ];

        let matches = m.find_top_matches("Scholar Geometry Box", &candidates).await;

        assert_eq!(matches.len(), TOP_MATCH_LIMIT);
        let ids: Vec<i64> = matches.iter().map(|tm| tm.existing_product_id).collect();
        assert_eq!(ids, vec![3, 4, 2]);
        assert!((matches[0].similarity_score - 1.0).abs() < 1e-9);
        assert!((matches[1].similarity_score - 6.0 / 7.0).abs() < 1e-9);
        assert!((matches[2].similarity_score - 5.0 / 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_top_matches_ties_keep_candidate_order() {
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_response("Aristo", FULL)
            .with_response("Brilliant", FULL)
            .with_response("Doodle", ALL_NULL);
        let m = matcher(backend);

        let candidates = vec![
            descriptor(10, "Aristo Geometry Box"),
            descriptor(11, "Brilliant Geometry Box"),
            descriptor(12, "Doodle Crayons"),
        ];

        let matches = m.find_top_matches("Scholar Geometry Box", &candidates).await;

        let ids: Vec<i64> = matches.iter().map(|tm| tm.existing_product_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn test_fewer_candidates_than_limit() {
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_response("Aristo", SIX_OF_SEVEN);
        let m = matcher(backend);

        let candidates = vec![descriptor(1, "Aristo Geometry Box")];
        let matches = m.find_top_matches("Scholar Geometry Box", &candidates).await;

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Aristo Geometry Box");
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty() {
        let backend = MockBackend::new().with_response("Scholar", FULL);
        let m = matcher(backend);

        let matches = m.find_top_matches("Scholar Geometry Box", &[]).await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_text_includes_description() {
        // The candidate's description participates in extraction: the
        // mock pattern here only appears in the description.
        let backend = MockBackend::new()
            .with_response("Scholar", FULL)
            .with_response("premium steel compass", FULL);
        let m = matcher(backend);

        let candidates = vec![ProductDescriptor::new(
            5,
            "Generic Box",
            Some("premium steel compass included".to_string()),
        )];

        let matches = m.find_top_matches("Scholar Geometry Box", &candidates).await;
        assert!((matches[0].similarity_score - 1.0).abs() < 1e-9);
    }
}
