use common::types::Product;
use tracing::{error, info, warn};

use crate::api::CatalogApi;
use crate::command::{Command, HELP};
use crate::errors::ClientError;
use crate::prompt::Prompter;
use crate::render;
use crate::state::{CatalogState, ProductForm};

/// What the command loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The catalog page: state container, API and the user prompter.
///
/// Every successful mutation is followed by a full refresh; failures only
/// notify the user and leave the displayed state as it was.
pub struct CatalogApp<P: Prompter> {
    api: CatalogApi,
    state: CatalogState,
    prompter: P,
}

impl<P: Prompter> CatalogApp<P> {
    pub fn new(api: CatalogApi, prompter: P) -> Self {
        Self { api, state: CatalogState::new(), prompter }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn render(&self) -> String {
        render::render_page(&self.state)
    }

    /// Fetch, sort and replace the list; on failure offer a reload until declined.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        loop {
            match self.api.list().await {
                Ok(products) => {
                    info!(count = products.len(), "products loaded");
                    self.state.replace_products(products);
                    return Ok(());
                }
                Err(e) => {
                    error!(error = %e, "error fetching products");
                    if !self.prompter.confirm("Could not load data! Reload?") {
                        return Err(e);
                    }
                }
            }
        }
    }

    /// Refresh after a mutation already succeeded; a failure here was
    /// already surfaced through the reload prompt.
    async fn refresh_after_change(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "list is stale after a successful change");
        }
    }

    pub async fn create(&mut self, form: ProductForm) -> Result<Product, ClientError> {
        match self.api.create(&form.to_payload()).await {
            Ok(created) => {
                self.refresh_after_change().await;
                self.prompter.notify("New product created successfully!");
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, "error creating product");
                self.prompter.notify("Error! New product not created!");
                Err(e)
            }
        }
    }

    /// Open the update form for a displayed row (zero-based).
    pub fn open_edit(&mut self, position: usize) -> Result<(), ClientError> {
        match self.state.open_edit(position) {
            Ok(_) => Ok(()),
            Err(e) => {
                error!(position, "no such local index");
                self.prompter.notify("No such product!");
                Err(e)
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Submit new values for the product the open form belongs to.
    pub async fn submit_edit(&mut self, values: ProductForm) -> Result<Product, ClientError> {
        let Some(id) = self.state.edit_form().map(|f| f.id.clone()) else {
            self.prompter.notify("No product is being edited!");
            return Err(ClientError::NoOpenForm);
        };
        match self.api.update(&id, &values.to_payload()).await {
            Ok(updated) => {
                self.state.cancel_edit();
                self.refresh_after_change().await;
                self.prompter.notify("Product updated successfully!");
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, %id, "error updating product");
                self.prompter.notify("Error! Product not updated!");
                Err(e)
            }
        }
    }

    /// Submit the open form with its pre-filled values unchanged.
    pub async fn submit_prefilled(&mut self) -> Result<Product, ClientError> {
        let Some(values) = self.state.edit_form().map(|f| f.values.clone()) else {
            self.prompter.notify("No product is being edited!");
            return Err(ClientError::NoOpenForm);
        };
        self.submit_edit(values).await
    }

    /// Delete a displayed row after confirmation. `Ok(false)` when declined.
    pub async fn delete(&mut self, position: usize) -> Result<bool, ClientError> {
        let (id, name) = match self.state.product_at(position) {
            Ok(p) => (p.id.clone(), p.name.clone()),
            Err(e) => {
                error!(position, "no such local index");
                self.prompter.notify("No such product!");
                return Err(e);
            }
        };
        if !self.prompter.confirm(&format!("Are you sure you want to delete product '{name}'?")) {
            return Ok(false);
        }
        match self.api.delete(&id).await {
            Ok(()) => {
                self.refresh_after_change().await;
                self.prompter.notify("Product deleted!");
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, %id, "error deleting product");
                self.prompter.notify("Error! Product not deleted!");
                Err(e)
            }
        }
    }

    /// Delete every product after confirmation. `Ok(false)` when declined.
    pub async fn delete_all(&mut self) -> Result<bool, ClientError> {
        if !self.prompter.confirm("Are you sure you want to delete all products?") {
            return Ok(false);
        }
        match self.api.delete_all().await {
            Ok(()) => {
                self.refresh_after_change().await;
                self.prompter.notify("All products deleted!");
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, "error deleting products");
                self.prompter.notify("Error! Products not deleted!");
                Err(e)
            }
        }
    }

    /// Run one parsed command. Errors were already shown to the user.
    pub async fn dispatch(&mut self, command: Command) -> Flow {
        let outcome = match command {
            Command::Refresh => self.refresh().await,
            Command::Add(form) => self.create(form).await.map(drop),
            Command::Edit(position) => self.open_edit(position),
            Command::Save(Some(form)) => self.submit_edit(form).await.map(drop),
            Command::Save(None) => self.submit_prefilled().await.map(drop),
            Command::Cancel => {
                self.cancel_edit();
                Ok(())
            }
            Command::Delete(position) => self.delete(position).await.map(drop),
            Command::Clear => self.delete_all().await.map(drop),
            Command::Help => {
                self.prompter.notify(HELP);
                Ok(())
            }
            Command::Quit => return Flow::Quit,
        };
        if let Err(e) = outcome {
            tracing::debug!(error = %e, "command failed");
        }
        Flow::Continue
    }
}
