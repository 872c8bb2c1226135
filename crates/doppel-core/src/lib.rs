//! # Doppel Core
//!
//! Shared domain types for the doppel duplicate-detection engine.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - [`types::ProductDescriptor`] — a catalog row reduced to what matching needs
//! - [`types::ProductVector`] — an embedding tagged with the model that produced it
//! - [`types::AttributeSet`] — the seven extracted product attributes
//! - [`types::ConfidenceLabel`] / [`types::ComparisonReport`] — comparison outcomes
//! - [`types::MergeAdvice`] — what the merge advisor tells an admin
//! - [`principal::Principal`] — the authenticated caller, resolved once at the boundary
//! - [`settings::Settings`] — environment-driven configuration
//!
//! Everything here is ephemeral plain data: nothing in this crate performs I/O
//! or owns a persistence lifecycle.
//!
//! ## Quick Start
//!
//! ```rust
//! use doppel_core::prelude::*;
//!
//! let descriptor = ProductDescriptor::new(1, "Camlin Geometry Box", None);
//! assert_eq!(descriptor.matching_text(), "Camlin Geometry Box ");
//! ```

pub mod principal;
pub mod settings;
pub mod types;
pub mod prelude;
