use common::types::{Price, Product, ProductPayload};

use crate::errors::ClientError;

/// Raw form fields as the user typed them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), price: price.into() }
    }

    /// The description is always sent, so an empty field clears it on update.
    /// Unparsable prices are sent as text and left for the server to reject.
    pub fn to_payload(&self) -> ProductPayload {
        let price = match self.price.trim().parse::<f64>() {
            Ok(n) => Price::Number(n),
            Err(_) => Price::Text(self.price.clone()),
        };
        ProductPayload {
            name: Some(self.name.clone()),
            description: Some(Some(self.description.clone())),
            price: Some(price),
        }
    }
}

/// An open edit form: pre-filled values plus the stored id they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub id: String,
    pub values: ProductForm,
}

impl EditForm {
    fn for_product(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            values: ProductForm {
                name: p.name.clone(),
                description: p.description.clone().unwrap_or_default(),
                price: p.price.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Closed,
    Open { position: usize, form: EditForm },
}

/// Everything the page shows: the last fetched list and at most one edit form.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    edit: EditState,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list (sorted by name, byte order) and close any open form.
    pub fn replace_products(&mut self, mut products: Vec<Product>) {
        products.sort_by(|a, b| a.name.cmp(&b.name));
        self.products = products;
        self.edit = EditState::Closed;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a displayed row by zero-based position.
    pub fn product_at(&self, position: usize) -> Result<&Product, ClientError> {
        self.products.get(position).ok_or(ClientError::NoSuchProduct(position))
    }

    /// Open the edit form for a row, replacing any form already open.
    /// A stale position leaves the state untouched.
    pub fn open_edit(&mut self, position: usize) -> Result<EditForm, ClientError> {
        let form = EditForm::for_product(self.product_at(position)?);
        self.edit = EditState::Open { position, form: form.clone() };
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Closed;
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        match &self.edit {
            EditState::Open { form, .. } => Some(form),
            EditState::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product { id: id.into(), name: name.into(), description: None, price }
    }

    #[test]
    fn replace_sorts_case_sensitively_and_closes_form() {
        let mut s = CatalogState::new();
        s.replace_products(vec![product("1", "pen", 1.0), product("2", "Zebra", 2.0), product("3", "Apple", 3.0)]);
        s.open_edit(0).unwrap();

        s.replace_products(vec![product("1", "pen", 1.0), product("2", "Zebra", 2.0), product("3", "Apple", 3.0)]);
        let names: Vec<&str> = s.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Zebra", "pen"]);
        assert_eq!(s.edit_state(), &EditState::Closed);
    }

    #[test]
    fn open_edit_prefills_and_keeps_stored_id() {
        let mut s = CatalogState::new();
        let mut p = product("65f1c0a2e4b0a1b2c3d4e5f6", "Pen", 2.5);
        p.description = Some("blue".into());
        s.replace_products(vec![p]);

        let form = s.open_edit(0).unwrap();
        assert_eq!(form.id, "65f1c0a2e4b0a1b2c3d4e5f6");
        assert_eq!(form.values, ProductForm::new("Pen", "blue", "2.5"));
        assert!(matches!(s.edit_state(), EditState::Open { position: 0, .. }));
    }

    #[test]
    fn stale_position_is_rejected_without_changing_state() {
        let mut s = CatalogState::new();
        s.replace_products(vec![product("a", "A", 1.0), product("b", "B", 1.0)]);
        s.open_edit(1).unwrap();
        assert!(matches!(s.open_edit(5), Err(ClientError::NoSuchProduct(5))));
        assert!(matches!(s.edit_state(), EditState::Open { position: 1, .. }));

        s.cancel_edit();
        assert!(s.edit_form().is_none());
    }

    #[test]
    fn form_payload_always_carries_description() {
        let payload = ProductForm::new("Pen", "", "1.25").to_payload();
        assert_eq!(payload.description, Some(Some(String::new())));
        assert_eq!(payload.price, Some(Price::Number(1.25)));

        let payload = ProductForm::new("Pen", "", "abc").to_payload();
        assert_eq!(payload.price, Some(Price::Text("abc".into())));
    }
}
