pub mod mongo;

pub use mongo::MongoProductRepository;
