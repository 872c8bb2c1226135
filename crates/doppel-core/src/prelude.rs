//! Prelude for convenient imports.

pub use crate::principal::{Principal, Role};
pub use crate::settings::{Settings, SettingsError};
pub use crate::types::{
    AttributeSet, ComparisonReport, ConfidenceLabel, MergeAdvice, MergeRecommendation,
    ProductDescriptor, ProductVector, TopMatch,
};
