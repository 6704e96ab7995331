//! Storage contract and the bundled in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::models::insight::Insight;
use crate::models::product::{Product, ProductCreate, ProductFilter, ProductUpdate};

/// Persistence contract consumed by the insight orchestration core and the
/// HTTP layer.
///
/// Implementations are long-lived, shared-read handles: construct once,
/// wrap in `Arc`, and pass clones to dependents.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Creates a product record, assigning its id and timestamps.
    async fn create_product(&self, create: ProductCreate) -> Result<Product, StorageError>;

    /// Fetches a product by id. `Ok(None)` when absent.
    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError>;

    /// Lists products matching the filter, oldest first, with
    /// skip/limit pagination.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError>;

    /// Applies a patch to a product. `Ok(None)` when the id is unknown.
    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StorageError>;

    /// Deletes a product and cascades to its stored insights. Returns
    /// whether a record was removed.
    async fn delete_product(&self, id: &str) -> Result<bool, StorageError>;

    /// Persists an insight record and returns the stored copy.
    async fn save_insight(&self, insight: Insight) -> Result<Insight, StorageError>;

    /// Insights for a product, in creation order.
    async fn list_insights(&self, product_id: &str) -> Result<Vec<Insight>, StorageError>;
}

/// In-memory [`ProductStore`].
///
/// Products are keyed by id; insights live in an append-only log, so
/// creation order is the storage order. Locks are held per operation only.
#[derive(Default)]
pub struct InMemoryStore {
    products: RwLock<HashMap<String, Product>>,
    insights: RwLock<Vec<Insight>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn create_product(&self, create: ProductCreate) -> Result<Product, StorageError> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: create.name,
            description: create.description,
            category: create.category,
            price: create.price,
            marketplace: create.marketplace,
            external_id: create.external_id,
            url: create.url,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %product.id, marketplace = %product.marketplace, "product created");
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| {
                filter
                    .marketplace
                    .as_deref()
                    .is_none_or(|m| p.marketplace == m)
                    && filter.category.as_deref().is_none_or(|c| {
                        p.category.as_deref() == Some(c)
                    })
            })
            .cloned()
            .collect();
        // Stable pagination over the unordered map: oldest first, id tiebreak.
        matching.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matching
            .into_iter()
            .skip(filter.skip)
            .take(filter.limit)
            .collect())
    }

    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StorageError> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = Some(description);
        }
        if let Some(category) = update.category {
            product.category = Some(category);
        }
        if let Some(price) = update.price {
            product.price = Some(price);
        }
        if let Some(marketplace) = update.marketplace {
            product.marketplace = marketplace;
        }
        if let Some(external_id) = update.external_id {
            product.external_id = Some(external_id);
        }
        if let Some(url) = update.url {
            product.url = Some(url);
        }
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: &str) -> Result<bool, StorageError> {
        let removed = self.products.write().await.remove(id).is_some();
        if removed {
            // Cascade: insight records do not outlive their product.
            self.insights
                .write()
                .await
                .retain(|i| i.product_id.as_deref() != Some(id));
            debug!(%id, "product deleted with insight cascade");
        }
        Ok(removed)
    }

    async fn save_insight(&self, insight: Insight) -> Result<Insight, StorageError> {
        debug!(
            id = %insight.id,
            product_id = insight.product_id.as_deref().unwrap_or("ad-hoc"),
            success = insight.is_success(),
            "insight saved"
        );
        self.insights.write().await.push(insight.clone());
        Ok(insight)
    }

    async fn list_insights(&self, product_id: &str) -> Result<Vec<Insight>, StorageError> {
        Ok(self
            .insights
            .read()
            .await
            .iter()
            .filter(|i| i.product_id.as_deref() == Some(product_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::insight::InsightType;

    fn sample_create(name: &str, marketplace: &str, category: Option<&str>) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            description: None,
            category: category.map(str::to_string),
            price: Some(19.99),
            marketplace: marketplace.into(),
            external_id: None,
            url: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemoryStore::new();
        let created = store
            .create_product(sample_create("Wireless Mouse", "amazon", None))
            .await
            .unwrap();
        let fetched = store.get_product(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_products_filters_and_paginates() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .create_product(sample_create(&format!("p{i}"), "amazon", Some("mice")))
                .await
                .unwrap();
        }
        store
            .create_product(sample_create("other", "ebay", Some("mice")))
            .await
            .unwrap();

        let filter = ProductFilter {
            marketplace: Some("amazon".into()),
            skip: 1,
            limit: 2,
            ..ProductFilter::default()
        };
        let page = store.list_products(&filter).await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.iter().all(|p| p.marketplace == "amazon"));

        let filter = ProductFilter {
            category: Some("kettles".into()),
            ..ProductFilter::default()
        };
        assert!(store.list_products(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let store = InMemoryStore::new();
        let created = store
            .create_product(sample_create("Wireless Mouse", "amazon", Some("mice")))
            .await
            .unwrap();

        let update = ProductUpdate {
            price: Some(24.99),
            ..ProductUpdate::default()
        };
        let updated = store
            .update_product(&created.id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, Some(24.99));
        assert_eq!(updated.name, "Wireless Mouse");
        assert_eq!(updated.category.as_deref(), Some("mice"));

        assert!(
            store
                .update_product("missing", ProductUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn insights_come_back_in_creation_order() {
        let store = InMemoryStore::new();
        let product = store
            .create_product(sample_create("Wireless Mouse", "amazon", None))
            .await
            .unwrap();

        let mut stored = Vec::new();
        for n in 0..3 {
            let insight = Insight::generated(
                Some(product.id.clone()),
                InsightType::General,
                format!("insight #{n}"),
                "llama3.2".into(),
            );
            stored.push(store.save_insight(insight).await.unwrap());
        }

        let listed = store.list_insights(&product.id).await.unwrap();
        assert_eq!(listed, stored);
    }

    #[tokio::test]
    async fn delete_cascades_to_insights() {
        let store = InMemoryStore::new();
        let product = store
            .create_product(sample_create("Wireless Mouse", "amazon", None))
            .await
            .unwrap();
        let adhoc = Insight::generated(None, InsightType::General, "keep me".into(), "m".into());
        store.save_insight(adhoc.clone()).await.unwrap();
        store
            .save_insight(Insight::generated(
                Some(product.id.clone()),
                InsightType::General,
                "drop me".into(),
                "m".into(),
            ))
            .await
            .unwrap();

        assert!(store.delete_product(&product.id).await.unwrap());
        assert!(!store.delete_product(&product.id).await.unwrap());
        assert!(store.get_product(&product.id).await.unwrap().is_none());
        assert!(store.list_insights(&product.id).await.unwrap().is_empty());
        // Ad-hoc insights are untouched by the cascade.
        assert_eq!(store.insights.read().await.len(), 1);
    }
}
