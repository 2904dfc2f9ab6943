use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Product;
use serde_json::Value;
use tracing::{debug, info};

use crate::{errors::ApiError, metrics, state::ServerState};

/// Unparsable bodies are treated like an invalid product (echoed as `null`),
/// so id and existence checks on update still run first.
fn body_or_null(payload: Result<Json<Value>, JsonRejection>) -> Value {
    match payload {
        Ok(Json(v)) => v,
        Err(rejection) => {
            debug!(error = %rejection, "request body is not JSON");
            Value::Null
        }
    }
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, ApiError> {
    metrics::record("list");
    let products = state.products.list().await.map_err(|e| ApiError::from_service(e, None))?;
    info!(count = products.len(), "list of all products requested");
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Malformed id or not found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    metrics::record("get");
    info!(%id, "product requested");
    let product = state.products.get(&id).await.map_err(|e| ApiError::from_service(e, None))?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Incorrect product", body = crate::openapi::IncorrectProductDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    metrics::record("create");
    let body = body_or_null(payload);
    info!(body = %body, "trying to add new product");
    let created = state
        .products
        .create(&body)
        .await
        .map_err(|e| ApiError::from_service(e, Some(body.clone())))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Incorrect product", body = crate::openapi::IncorrectProductDoc),
        (status = 404, description = "Malformed id or not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    metrics::record("update");
    let body = body_or_null(payload);
    info!(%id, "request to update product");
    let updated = state
        .products
        .update(&id, &body)
        .await
        .map_err(|e| ApiError::from_service(e, Some(body.clone())))?;
    Ok((StatusCode::CREATED, Json(updated)))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id (24 hex chars)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Malformed id or not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    metrics::record("delete");
    info!(%id, "request to delete product");
    state.products.delete(&id).await.map_err(|e| ApiError::from_service(e, None))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/products", tag = "products",
    responses(
        (status = 204, description = "All products deleted"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, ApiError> {
    metrics::record("delete_all");
    info!("request to delete all products");
    state.products.delete_all().await.map_err(|e| ApiError::from_service(e, None))?;
    Ok(StatusCode::NO_CONTENT)
}
