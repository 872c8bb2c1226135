//! Shared types used across all doppel crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog row reduced to the fields the matchers need.
///
/// Descriptors are constructed ad hoc from product rows for a single
/// matching call; they are never persisted on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl ProductDescriptor {
    /// Create a new descriptor.
    pub fn new(id: i64, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
        }
    }

    /// The text fed to embedding and attribute extraction: name and
    /// description joined by a single space (a missing description
    /// contributes an empty string).
    pub fn matching_text(&self) -> String {
        format!("{} {}", self.name, self.description.as_deref().unwrap_or(""))
    }
}

/// An embedding vector tagged with the model that produced it.
///
/// Two vectors are comparable only when both the model tag and the
/// dimension agree; the similarity scorer rejects anything else rather
/// than producing a silently meaningless score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVector {
    /// Identifier of the embedding model that produced the values.
    pub model: String,
    /// The vector components.
    pub values: Vec<f32>,
}

impl ProductVector {
    /// Create a new tagged vector.
    pub fn new(model: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            model: model.into(),
            values,
        }
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Whether cosine similarity against `other` is meaningful.
    pub fn comparable_with(&self, other: &ProductVector) -> bool {
        self.model == other.model && self.dimension() == other.dimension()
    }
}

/// The seven product attributes pulled out of a free-text description.
///
/// Every field is optional: `None` means the attribute was not
/// mentioned, or extraction could not determine it. An all-`None` set
/// (see [`AttributeSet::unknown`]) means "unknown", not "confirmed
/// absent" — comparisons against it score low rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    pub brand: Option<String>,
    pub item_type: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<String>,
    pub packaging: Option<String>,
    pub target_users: Option<String>,
    pub purpose: Option<String>,
}

impl AttributeSet {
    /// The fail-open value: all seven fields `None`.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True when no field carries a value.
    pub fn is_unknown(&self) -> bool {
        self.brand.is_none()
            && self.item_type.is_none()
            && self.size.is_none()
            && self.quantity.is_none()
            && self.packaging.is_none()
            && self.target_users.is_none()
            && self.purpose.is_none()
    }

    /// Look up a field by its JSON key. Unknown keys read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "brand" => self.brand.as_deref(),
            "item_type" => self.item_type.as_deref(),
            "size" => self.size.as_deref(),
            "quantity" => self.quantity.as_deref(),
            "packaging" => self.packaging.as_deref(),
            "target_users" => self.target_users.as_deref(),
            "purpose" => self.purpose.as_deref(),
            _ => None,
        }
    }
}

/// Three-tier label attached to an attribute comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    #[serde(rename = "High Confidence Duplicate")]
    HighConfidenceDuplicate,
    #[serde(rename = "Moderate Similarity - Review Required")]
    ModerateReviewRequired,
    #[serde(rename = "Low Similarity - New Product")]
    LowNewProduct,
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLabel::HighConfidenceDuplicate => "High Confidence Duplicate",
            ConfidenceLabel::ModerateReviewRequired => "Moderate Similarity - Review Required",
            ConfidenceLabel::LowNewProduct => "Low Similarity - New Product",
        };
        f.write_str(label)
    }
}

/// Outcome of comparing two attribute sets field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Fraction of the seven fields that matched, in `[0, 1]`.
    pub similarity_score: f64,
    pub confidence_label: ConfidenceLabel,
    /// Notes for fields that matched, e.g. "brand match".
    pub matched: Vec<String>,
    /// Notes for fields that differ, e.g. "item type difference".
    pub differing: Vec<String>,
}

/// One entry in a ranked list of likely catalog matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMatch {
    pub existing_product_id: i64,
    pub name: String,
    pub similarity_score: f64,
}

/// Whether a matched pair should become one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRecommendation {
    Merge,
    KeepSeparate,
}

impl fmt::Display for MergeRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MergeRecommendation::Merge => "merge",
            MergeRecommendation::KeepSeparate => "keep_separate",
        };
        f.write_str(s)
    }
}

/// Advice produced by the merge advisor for an admin to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeAdvice {
    #[serde(rename = "merge_recommendation")]
    pub recommendation: MergeRecommendation,
    #[serde(rename = "merge_reason")]
    pub reason: String,
    /// Fields worth copying from the new listing into the catalog
    /// entry; empty when nothing should be carried over.
    pub fields_to_copy: Vec<String>,
}
