//! Terminal catalog client.
//! - `CatalogState` holds the last fetched product list and the edit form.
//! - `render` turns state into text without touching the network.
//! - `CatalogApp` performs actions and re-fetches the full list after every mutation.

pub mod api;
pub mod app;
pub mod command;
pub mod errors;
pub mod prompt;
pub mod render;
pub mod state;

pub use api::CatalogApi;
pub use app::CatalogApp;
pub use state::{CatalogState, ProductForm};
