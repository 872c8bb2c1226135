//! Embedding backfill for products missing vectors.

use crate::catalog::CatalogProduct;
use doppel_embeddings::TextEmbedder;
use tracing::{error, info, warn};

/// Number of products per logged chunk.
pub const CHUNK_SIZE: usize = 100;

/// Outcome counts from a backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Products that received a vector.
    pub embedded: usize,
    /// Products skipped because they have no text.
    pub skipped_blank: usize,
    /// Products whose provider call failed.
    pub failed: usize,
}

/// Fill in missing vectors across `products`, in place.
///
/// Products that already have a vector are left alone. Work proceeds in
/// chunks of [`CHUNK_SIZE`] with progress logged per chunk, and a
/// per-product failure is counted without stopping the run, so one bad
/// product cannot starve the rest of the catalog.
pub async fn backfill_embeddings(
    embedder: &dyn TextEmbedder,
    products: &mut [CatalogProduct],
) -> BackfillReport {
    info!("Starting product embedding backfill");

    let mut report = BackfillReport::default();
    let mut pending: Vec<&mut CatalogProduct> = products
        .iter_mut()
        .filter(|p| p.vector.is_none())
        .collect();

    if pending.is_empty() {
        info!("No products to process");
        return report;
    }

    let mut chunk_count = 0usize;
    for chunk in pending.chunks_mut(CHUNK_SIZE) {
        chunk_count += 1;
        info!(
            "Processing chunk {} with {} products",
            chunk_count,
            chunk.len()
        );

        for product in chunk.iter_mut() {
            let text = format!(
                "{} {}",
                product.name,
                product.description.as_deref().unwrap_or("")
            );
            let text = text.trim();

            if text.is_empty() {
                warn!("Product {} has no text to embed", product.id);
                report.skipped_blank += 1;
                continue;
            }

            match embedder.embed(text).await {
                Ok(vector) => {
                    product.vector = Some(vector);
                    report.embedded += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to generate embedding for product {}: {}",
                        product.id, e
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "Chunk {} processed. Total embedded so far: {}",
            chunk_count, report.embedded
        );
    }

    info!(
        "Embedding backfill completed. Total products embedded: {}",
        report.embedded
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppel_core::types::ProductVector;
    use doppel_embeddings::MockEmbedder;

    fn product(id: i64, name: &str, description: Option<&str>) -> CatalogProduct {
        CatalogProduct {
            id,
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            vendor_id: 1,
            is_public: true,
            vector: None,
        }
    }

    #[tokio::test]
    async fn test_backfill_counts_and_skips() {
        let embedder = MockEmbedder::new("test-model", 2)
            .with_vector("Bottle", vec![1.0, 0.0])
            .with_failure("Cursed");

        let mut products = vec![
            product(1, "Steel Bottle", Some("insulated")),
            product(2, "", None),
            product(3, "Cursed Product", None),
            product(4, "", Some("   ")),
            product(5, "Wooden Ruler", Some("30cm")),
        ];
        // Already embedded; must not be touched
        products.push(CatalogProduct {
            vector: Some(ProductVector::new("old-model", vec![9.0, 9.0])),
            ..product(6, "Bottle Opener", None)
        });

        let report = backfill_embeddings(&embedder, &mut products).await;

        assert_eq!(
            report,
            BackfillReport {
                embedded: 2,
                skipped_blank: 2,
                failed: 1,
            }
        );
        assert!(products[0].vector.is_some());
        assert!(products[1].vector.is_none());
        assert!(products[2].vector.is_none());
        assert!(products[3].vector.is_none());
        assert!(products[4].vector.is_some());
        // Pre-existing vector untouched, old model tag and all
        assert_eq!(products[5].vector.as_ref().map(|v| v.model.as_str()), Some("old-model"));
    }

    #[tokio::test]
    async fn test_backfill_blank_text_trims_whitespace() {
        let embedder = MockEmbedder::new("test-model", 2);

        let mut products = vec![product(1, " ", Some("  "))];
        let report = backfill_embeddings(&embedder, &mut products).await;

        assert_eq!(report.skipped_blank, 1);
        assert_eq!(report.embedded, 0);
    }

    #[tokio::test]
    async fn test_backfill_spans_multiple_chunks() {
        let embedder = MockEmbedder::new("test-model", 2);

        let mut products: Vec<CatalogProduct> = (0..205)
            .map(|i| product(i, &format!("Product {}", i), None))
            .collect();

        let report = backfill_embeddings(&embedder, &mut products).await;

        assert_eq!(report.embedded, 205);
        assert_eq!(report.failed, 0);
        assert!(products.iter().all(|p| p.vector.is_some()));
    }

    #[tokio::test]
    async fn test_backfill_empty_input() {
        let embedder = MockEmbedder::new("test-model", 2);

        let mut products: Vec<CatalogProduct> = Vec::new();
        let report = backfill_embeddings(&embedder, &mut products).await;

        assert_eq!(report, BackfillReport::default());
    }
}
