use models::product::{self, ProductDocument, ProductDraft, ProductId};
use mongodb::Collection;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// MongoDB-backed repository over a single products collection.
pub struct MongoProductRepository {
    pub coll: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(coll: Collection<ProductDocument>) -> Self { Self { coll } }
}

#[async_trait::async_trait]
impl ProductRepository for MongoProductRepository {
    async fn list(&self) -> Result<Vec<ProductDocument>, ServiceError> {
        Ok(product::find_all(&self.coll).await?)
    }

    async fn get(&self, id: ProductId) -> Result<Option<ProductDocument>, ServiceError> {
        Ok(product::find_by_id(&self.coll, id).await?)
    }

    async fn insert(&self, draft: ProductDraft) -> Result<ProductDocument, ServiceError> {
        Ok(product::insert(&self.coll, draft).await?)
    }

    async fn replace(&self, doc: ProductDocument) -> Result<Option<ProductDocument>, ServiceError> {
        Ok(product::replace(&self.coll, &doc).await?)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(product::delete_by_id(&self.coll, id).await?)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        Ok(product::delete_all(&self.coll).await?)
    }
}
