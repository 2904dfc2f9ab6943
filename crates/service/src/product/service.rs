use std::sync::Arc;

use common::types::Product;
use models::product::{self, ProductId};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Catalog business service independent of the web framework.
///
/// Ids arrive as raw path segments and are checked structurally here, before
/// any repository call. Bodies arrive as raw JSON so that callers can echo
/// them back on validation failure.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let docs = self.repo.list().await?;
        debug!(count = docs.len(), "products_listed");
        Ok(docs.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> Result<Product, ServiceError> {
        let id = ProductId::parse(raw_id)?;
        self.repo
            .get(id)
            .await?
            .map(Product::from)
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    /// Validate and insert a new product.
    ///
    /// # Examples
    /// ```
    /// use service::product::{repository::memory::InMemoryProductRepository, ProductService};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let body = serde_json::json!({"name": "Pen", "price": 1.5});
    /// let created = tokio_test::block_on(svc.create(&body)).unwrap();
    /// assert_eq!(created.name, "Pen");
    /// assert_eq!(created.id.len(), 24);
    /// ```
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &Value) -> Result<Product, ServiceError> {
        let draft = product::validate_json(body)?;
        let doc = self.repo.insert(draft).await?;
        info!(id = %doc.id, name = %doc.name, "product_created");
        Ok(doc.into())
    }

    /// Replace `name` and `price`; `description` follows the payload's
    /// keep/clear/set intent against the stored value.
    #[instrument(skip(self, body))]
    pub async fn update(&self, raw_id: &str, body: &Value) -> Result<Product, ServiceError> {
        let id = ProductId::parse(raw_id)?;
        let existing = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("product"))?;
        let draft = product::validate_json(body)?;
        let doc = draft.into_document(id, existing.description);
        let updated = self
            .repo
            .replace(doc)
            .await?
            // removed between the read and the write
            .ok_or_else(|| ServiceError::not_found("product"))?;
        info!(id = %updated.id, "product_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = ProductId::parse(raw_id)?;
        if self.repo.delete(id).await? {
            info!(id = %id, "product_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("product"))
        }
    }

    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let n = self.repo.delete_all().await?;
        info!(deleted = n, "all_products_deleted");
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::memory::InMemoryProductRepository;
    use serde_json::json;

    fn svc() -> ProductService<InMemoryProductRepository> {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() -> anyhow::Result<()> {
        let svc = svc();
        for (name, price) in [("Pen", 1.5), ("Book", 0.0), ("Lamp", 1999.99)] {
            let created = svc.create(&json!({"name": name, "price": price})).await?;
            let fetched = svc.get(&created.id).await?;
            assert_eq!(fetched, created);
            assert_eq!(fetched.name, name);
            assert_eq!(fetched.price, price);
            assert_eq!(fetched.description, None);
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payloads_leave_the_store_unchanged() -> anyhow::Result<()> {
        let svc = svc();
        svc.create(&json!({"name": "Keep", "price": 1})).await?;
        for body in [
            json!({"name": "", "price": 1}),
            json!({"name": "Neg", "price": -1}),
            json!({"name": "Nan", "price": "twelve"}),
        ] {
            assert!(matches!(svc.create(&body).await, Err(ServiceError::Validation(_))));
        }
        assert_eq!(svc.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_preserves_or_clears_description() -> anyhow::Result<()> {
        let svc = svc();
        let p = svc.create(&json!({"name": "Pen", "description": "blue", "price": 1})).await?;

        let kept = svc.update(&p.id, &json!({"name": "Pen", "price": 2})).await?;
        assert_eq!(kept.description.as_deref(), Some("blue"));
        assert_eq!(kept.price, 2.0);

        let cleared = svc.update(&p.id, &json!({"name": "Pen", "description": "", "price": 2})).await?;
        assert_eq!(cleared.description, None);
        assert_eq!(svc.get(&p.id).await?.description, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() -> anyhow::Result<()> {
        let svc = svc();
        let missing = ProductId::generate().to_string();
        let bad = json!({"name": "", "price": -1});
        assert!(matches!(svc.update(&missing, &bad).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update("abc", &bad).await, Err(ServiceError::InvalidId(_))));

        let p = svc.create(&json!({"name": "Pen", "price": 1})).await?;
        assert!(matches!(svc.update(&p.id, &bad).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get(&p.id).await?.price, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn delete_distinguishes_malformed_and_missing_ids() -> anyhow::Result<()> {
        let svc = svc();
        assert!(matches!(svc.delete("abc").await, Err(ServiceError::InvalidId(_))));
        let missing = ProductId::generate().to_string();
        assert!(matches!(svc.delete(&missing).await, Err(ServiceError::NotFound(_))));

        let p = svc.create(&json!({"name": "Pen", "price": 1})).await?;
        svc.delete(&p.id).await?;
        assert!(matches!(svc.get(&p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_empties_the_catalog() -> anyhow::Result<()> {
        let svc = svc();
        svc.create(&json!({"name": "A", "price": 1})).await?;
        svc.create(&json!({"name": "B", "price": 2})).await?;
        assert_eq!(svc.delete_all().await?, 2);
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}
