use async_trait::async_trait;
use models::product::{ProductDocument, ProductDraft, ProductId};

use crate::errors::ServiceError;

/// Persistence abstraction for the products collection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductDocument>, ServiceError>;
    async fn get(&self, id: ProductId) -> Result<Option<ProductDocument>, ServiceError>;
    async fn insert(&self, draft: ProductDraft) -> Result<ProductDocument, ServiceError>;
    /// Full replacement keyed by `doc.id`; `None` if the record is gone.
    async fn replace(&self, doc: ProductDocument) -> Result<Option<ProductDocument>, ServiceError>;
    async fn delete(&self, id: ProductId) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
}

/// In-memory repository for tests and local runs without MongoDB.
pub mod memory {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        docs: RwLock<Vec<ProductDocument>>, // insertion order, like a collection scan
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn list(&self) -> Result<Vec<ProductDocument>, ServiceError> {
            Ok(self.docs.read().await.clone())
        }

        async fn get(&self, id: ProductId) -> Result<Option<ProductDocument>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs.iter().find(|d| d.product_id() == id).cloned())
        }

        async fn insert(&self, draft: ProductDraft) -> Result<ProductDocument, ServiceError> {
            let doc = draft.into_document(ProductId::generate(), None);
            self.docs.write().await.push(doc.clone());
            Ok(doc)
        }

        async fn replace(&self, doc: ProductDocument) -> Result<Option<ProductDocument>, ServiceError> {
            let mut docs = self.docs.write().await;
            match docs.iter_mut().find(|d| d.id == doc.id) {
                Some(slot) => {
                    *slot = doc.clone();
                    Ok(Some(doc))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
            let mut docs = self.docs.write().await;
            let before = docs.len();
            docs.retain(|d| d.product_id() != id);
            Ok(docs.len() != before)
        }

        async fn delete_all(&self) -> Result<u64, ServiceError> {
            let mut docs = self.docs.write().await;
            let n = docs.len() as u64;
            docs.clear();
            Ok(n)
        }
    }
}
