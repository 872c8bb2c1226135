//! Field-by-field attribute comparison.

use doppel_core::types::{AttributeSet, ComparisonReport, ConfidenceLabel};

/// The seven attributes every comparison walks, in fixed order.
pub const ATTRIBUTE_KEYS: [&str; 7] = [
    "brand",
    "item_type",
    "size",
    "quantity",
    "packaging",
    "target_users",
    "purpose",
];

/// Compare two attribute sets key by key.
///
/// A key *matches* when both sides are present (non-null, non-empty)
/// and equal ignoring case. A key *differs* when the raw values are
/// unequal, which includes present-vs-null and present-vs-empty. Both
/// sides empty or both null is neither. The score is the match count
/// over all seven keys.
pub fn compare_attributes(a: &AttributeSet, b: &AttributeSet) -> ComparisonReport {
    let mut matched = Vec::new();
    let mut differing = Vec::new();
    let mut matches = 0usize;

    for key in ATTRIBUTE_KEYS {
        let val_a = a.get(key);
        let val_b = b.get(key);

        match (val_a, val_b) {
            (Some(x), Some(y))
                if !x.is_empty() && !y.is_empty() && x.to_lowercase() == y.to_lowercase() =>
            {
                matched.push(format!("{} match", key.replace('_', " ")));
                matches += 1;
            }
            _ if val_a != val_b => {
                differing.push(format!("{} difference", key.replace('_', " ")));
            }
            _ => {}
        }
    }

    let similarity_score = matches as f64 / ATTRIBUTE_KEYS.len() as f64;

    ComparisonReport {
        similarity_score,
        confidence_label: confidence_label(similarity_score),
        matched,
        differing,
    }
}

/// Map an attribute similarity score to a confidence label.
///
/// Scores in the gap above 0.89 and up to 0.90 satisfy neither band and
/// fall through to low. With seven keys the possible scores never land
/// there, but the pinning test below keeps the boundary honest.
pub fn confidence_label(score: f64) -> ConfidenceLabel {
    if score > 0.90 {
        ConfidenceLabel::HighConfidenceDuplicate
    } else if (0.70..=0.89).contains(&score) {
        ConfidenceLabel::ModerateReviewRequired
    } else {
        ConfidenceLabel::LowNewProduct
    }
}
