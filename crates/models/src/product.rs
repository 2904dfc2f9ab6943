use std::fmt;

use common::types::{Product, ProductPayload};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Store-assigned product identifier (a MongoDB ObjectId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(ObjectId);

impl ProductId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Structural check only: 24 hex characters. Says nothing about existence.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| ModelError::InvalidId(raw.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    fn filter(&self) -> Document {
        doc! { "_id": self.0 }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// A product as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl ProductDocument {
    pub fn product_id(&self) -> ProductId {
        ProductId(self.id)
    }
}

impl From<ProductDocument> for Product {
    fn from(d: ProductDocument) -> Self {
        Product { id: d.id.to_hex(), name: d.name, description: d.description, price: d.price }
    }
}

/// What an incoming payload wants done with the stored description.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionChange {
    Keep,
    Clear,
    Set(String),
}

impl DescriptionChange {
    fn from_payload(raw: &Option<Option<String>>) -> Self {
        match raw {
            None => DescriptionChange::Keep,
            Some(None) => DescriptionChange::Clear,
            Some(Some(s)) if s.is_empty() => DescriptionChange::Clear,
            Some(Some(s)) => DescriptionChange::Set(s.clone()),
        }
    }

    pub fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            DescriptionChange::Keep => current,
            DescriptionChange::Clear => None,
            DescriptionChange::Set(s) => Some(s),
        }
    }
}

/// A payload that passed validation and may be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: DescriptionChange,
    pub price: f64,
}

impl ProductDraft {
    /// Materialize the draft; `current` is the stored description, if any.
    pub fn into_document(self, id: ProductId, current: Option<String>) -> ProductDocument {
        ProductDocument {
            id: id.as_object_id(),
            name: self.name,
            description: self.description.apply(current),
            price: self.price,
        }
    }
}

/// `name` must be a non-empty string and `price` a finite, non-negative number.
pub fn validate(payload: &ProductPayload) -> Result<ProductDraft, ModelError> {
    let name = match payload.name.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return Err(ModelError::Validation("name is required".into())),
    };
    let price = payload
        .price
        .as_ref()
        .ok_or_else(|| ModelError::Validation("price is required".into()))?
        .value()
        .map_err(|e| ModelError::Validation(e.to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation(format!("price must be a non-negative number, got {price}")));
    }
    Ok(ProductDraft { name, description: DescriptionChange::from_payload(&payload.description), price })
}

/// Validate a raw JSON body. Wrong shapes count as validation failures.
pub fn validate_json(raw: &serde_json::Value) -> Result<ProductDraft, ModelError> {
    if !raw.is_object() {
        return Err(ModelError::Validation("product must be a JSON object".into()));
    }
    let payload = ProductPayload::deserialize(raw)
        .map_err(|e| ModelError::Validation(format!("malformed product: {e}")))?;
    validate(&payload)
}

pub async fn find_all(coll: &Collection<ProductDocument>) -> Result<Vec<ProductDocument>, ModelError> {
    let cursor = coll.find(doc! {}).await?;
    let docs: Vec<ProductDocument> = cursor.try_collect().await?;
    Ok(docs)
}

pub async fn find_by_id(coll: &Collection<ProductDocument>, id: ProductId) -> Result<Option<ProductDocument>, ModelError> {
    Ok(coll.find_one(id.filter()).await?)
}

pub async fn insert(coll: &Collection<ProductDocument>, draft: ProductDraft) -> Result<ProductDocument, ModelError> {
    let doc = draft.into_document(ProductId::generate(), None);
    coll.insert_one(&doc).await?;
    Ok(doc)
}

/// Replace the whole document; `None` when nothing matched.
pub async fn replace(coll: &Collection<ProductDocument>, doc: &ProductDocument) -> Result<Option<ProductDocument>, ModelError> {
    let updated = coll
        .find_one_and_replace(doc.product_id().filter(), doc)
        .return_document(ReturnDocument::After)
        .await?;
    Ok(updated)
}

pub async fn delete_by_id(coll: &Collection<ProductDocument>, id: ProductId) -> Result<bool, ModelError> {
    let res = coll.delete_one(id.filter()).await?;
    Ok(res.deleted_count > 0)
}

pub async fn delete_all(coll: &Collection<ProductDocument>) -> Result<u64, ModelError> {
    let res = coll.delete_many(doc! {}).await?;
    Ok(res.deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_valid_products() {
        let draft = validate_json(&json!({"name": "Pen", "price": 1.5})).unwrap();
        assert_eq!(draft.name, "Pen");
        assert_eq!(draft.price, 1.5);
        assert_eq!(draft.description, DescriptionChange::Keep);

        let draft = validate_json(&json!({"name": "Free", "price": "0"})).unwrap();
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn rejects_empty_name_and_bad_prices() {
        for body in [
            json!({"name": "", "price": 1}),
            json!({"price": 1}),
            json!({"name": "Pen", "price": -0.01}),
            json!({"name": "Pen", "price": "abc"}),
            json!({"name": "Pen", "price": null}),
            json!({"name": "Pen"}),
            json!({"name": "Pen", "price": "inf"}),
            json!({"name": 5, "price": 1}),
            json!(["Pen", 1]),
        ] {
            assert!(
                matches!(validate_json(&body), Err(ModelError::Validation(_))),
                "expected rejection for {body}"
            );
        }
    }

    #[test]
    fn description_changes_follow_payload() {
        let keep = validate_json(&json!({"name": "Pen", "price": 1})).unwrap();
        assert_eq!(keep.description.apply(Some("old".into())), Some("old".into()));

        let clear = validate_json(&json!({"name": "Pen", "price": 1, "description": ""})).unwrap();
        assert_eq!(clear.description.apply(Some("old".into())), None);

        let null = validate_json(&json!({"name": "Pen", "price": 1, "description": null})).unwrap();
        assert_eq!(null.description, DescriptionChange::Clear);

        let set = validate_json(&json!({"name": "Pen", "price": 1, "description": "blue"})).unwrap();
        assert_eq!(set.description.apply(None), Some("blue".into()));
    }

    #[test]
    fn ids_are_checked_structurally() {
        assert!(ProductId::parse("abc").is_err());
        assert!(ProductId::parse("65f1c0a2e4b0a1b2c3d4e5fz").is_err());
        let id = ProductId::parse("65f1c0a2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.to_string(), "65f1c0a2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn document_converts_to_wire_product() {
        let id = ProductId::generate();
        let draft = validate_json(&json!({"name": "Pen", "price": 2, "description": "blue"})).unwrap();
        let product: Product = draft.into_document(id, None).into();
        assert_eq!(product.id, id.to_string());
        assert_eq!(product.description.as_deref(), Some("blue"));
    }
}
