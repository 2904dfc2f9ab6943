use common::types::{Product, ProductPayload};
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::errors::ClientError;

/// Thin wrapper over the catalog REST endpoints.
///
/// Any non-2xx status is an error; bodies of failed responses are not parsed.
#[derive(Clone)]
pub struct CatalogApi {
    http: Client,
    base_url: String,
}

impl CatalogApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("catalog-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    fn ensure_ok(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            debug!(%status, "non-success response");
            Err(ClientError::Status(status))
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let resp = self.http.get(self.products_url()).send().await?;
        Ok(Self::ensure_ok(resp)?.json().await?)
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let resp = self.http.post(self.products_url()).json(payload).send().await?;
        Ok(Self::ensure_ok(resp)?.json().await?)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: &ProductPayload) -> Result<Product, ClientError> {
        let resp = self.http.put(self.product_url(id)).json(payload).send().await?;
        Ok(Self::ensure_ok(resp)?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.product_url(id)).send().await?;
        Self::ensure_ok(resp)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<(), ClientError> {
        let resp = self.http.delete(self.products_url()).send().await?;
        Self::ensure_ok(resp)?;
        Ok(())
    }
}
