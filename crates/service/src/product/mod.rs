//! Product catalog: repository abstraction, MongoDB implementation, business service.

pub mod repository;
pub mod repo;
pub mod service;

pub use repository::ProductRepository;
pub use service::ProductService;
