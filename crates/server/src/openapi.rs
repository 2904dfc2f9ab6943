use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ProductDoc {
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0a2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// `price` may also be sent as a numeric string. Omitting `description` on
/// update keeps the stored one; `null` or `""` clears it.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct IncorrectProductDoc {
    pub message: String,
    pub code: Option<String>,
    #[schema(value_type = Object)]
    pub request_object: serde_json::Value,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::products::delete_all,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            IncorrectProductDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
