use std::sync::Arc;

use service::product::{ProductRepository, ProductService};

#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(ProductService::new(repo)) }
    }
}
