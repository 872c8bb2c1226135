//! Merge advice for matched products.

use crate::compare::compare_attributes;
use doppel_core::types::{MergeAdvice, MergeRecommendation};
use doppel_llm::AttributeExtractor;

/// Advise whether a new product should merge into a matched catalog item.
///
/// Both texts go through attribute extraction, the comparison score
/// picks a tier, and each tier carries a fixed recommendation, reason,
/// and list of fields worth copying onto the surviving record.
pub async fn recommend_merge(
    extractor: &AttributeExtractor,
    new_text: &str,
    matched_text: &str,
) -> MergeAdvice {
    let attr_new = extractor.extract(new_text).await;
    let attr_matched = extractor.extract(matched_text).await;
    let report = compare_attributes(&attr_new, &attr_matched);

    advice_for(report.similarity_score)
}

fn advice_for(similarity_score: f64) -> MergeAdvice {
    if similarity_score > 0.90 {
        MergeAdvice {
            recommendation: MergeRecommendation::Merge,
            reason: "High similarity indicates these are the same product".to_string(),
            fields_to_copy: vec![
                "description".to_string(),
                "seo_keywords".to_string(),
                "brand".to_string(),
                "warranty".to_string(),
            ],
        }
    } else if (0.70..=0.89).contains(&similarity_score) {
        MergeAdvice {
            recommendation: MergeRecommendation::KeepSeparate,
            reason: "Moderate similarity suggests they are related but distinct products"
                .to_string(),
            fields_to_copy: vec!["brand".to_string(), "category".to_string()],
        }
    } else {
        MergeAdvice {
            recommendation: MergeRecommendation::KeepSeparate,
            reason: "Low similarity indicates they are different products".to_string(),
            fields_to_copy: Vec::new(),
        }
    }
}
