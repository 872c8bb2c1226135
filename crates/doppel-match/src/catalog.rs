//! Catalog rows and visibility rules for matching.

use crate::gate::EmbeddedProduct;
use doppel_core::principal::Principal;
use doppel_core::types::{ProductDescriptor, ProductVector};

/// A catalog product as the matching paths see it.
///
/// Persistence stays with the caller; this is the projection matching
/// needs, convertible to the narrower views each path takes.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub vendor_id: i64,
    pub is_public: bool,
    pub vector: Option<ProductVector>,
}

impl CatalogProduct {
    /// Project to the descriptor attribute matching works on.
    pub fn descriptor(&self) -> ProductDescriptor {
        ProductDescriptor::new(self.id, self.name.clone(), self.description.clone())
    }

    /// Project to the duplicate gate's view.
    pub fn embedded(&self) -> EmbeddedProduct {
        EmbeddedProduct {
            id: self.id,
            name: self.name.clone(),
            vector: self.vector.clone(),
        }
    }
}

/// Filter products to those the principal may see in match suggestions.
///
/// Admins see the whole catalog; everyone else only public products.
/// Private products must not leak into another vendor's suggestions, so
/// callers resolving an unknown caller should pass a customer-role
/// principal.
pub fn visible_for_matching(
    principal: Principal,
    products: &[CatalogProduct],
) -> Vec<&CatalogProduct> {
    products
        .iter()
        .filter(|p| principal.is_admin() || p.is_public)
        .collect()
}
