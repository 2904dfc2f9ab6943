//! Service layer providing the product catalog operations on top of models.
//! - Separates business rules (validation, description merge) from data access.
//! - `ProductRepository` is the seam between the service and MongoDB.

pub mod errors;
pub mod product;

pub use product::ProductService;
