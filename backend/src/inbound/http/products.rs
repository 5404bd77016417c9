//! Product catalogue and redemption handlers.
//!
//! ```text
//! GET  /api/v1/products
//! POST /api/v1/products {"title":"Mug","description":"","price":30,"quantity":2,"image":"mug.png"}
//! POST /api/v1/products/{product_id}/buy
//! GET  /api/v1/users/me/products
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Ownership, OwnershipId, Product, ProductDraft, ProductId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::assets::{ImageKind, image_url};
use crate::inbound::http::auth::require_expert;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_product_error;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    pub image_url: String,
}

impl ProductResponse {
    fn render(req: &HttpRequest, product: Product) -> Self {
        Self {
            image_url: image_url(req, ImageKind::Product, &product.image),
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    pub image: String,
}

/// Ownership record created by a purchase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipResponse {
    pub id: OwnershipId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub purchased_at: DateTime<Utc>,
}

impl From<Ownership> for OwnershipResponse {
    fn from(value: Ownership) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            product_id: value.product_id,
            purchased_at: value.purchased_at,
        }
    }
}

/// List the catalogue with absolute image URLs.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Catalogue", body = [ProductResponse]),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security([])
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state.products.list_products().await?;
    Ok(web::Json(
        products
            .into_iter()
            .map(|product| ProductResponse::render(&req, product))
            .collect(),
    ))
}

/// Add a catalogue entry. Experts only.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Expert account required", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    require_expert(&state, &session).await?;
    let payload = payload.into_inner();
    let draft = ProductDraft::try_new(
        payload.title,
        payload.description,
        payload.price,
        payload.quantity,
        payload.image,
    )
    .map_err(map_product_error)?;
    let product = state.products.create_product(&draft).await?;
    Ok(HttpResponse::Created().json(ProductResponse::render(&req, product)))
}

/// Spend score on one unit of a product.
///
/// Refusals (missing product, sold out, insufficient score) answer `400` with
/// `code = "unavailable"` and the reason in `details.reason`.
#[utoipa::path(
    post,
    path = "/api/v1/products/{product_id}/buy",
    params(("product_id" = i32, Path, description = "Product to redeem")),
    responses(
        (status = 200, description = "Ownership record", body = OwnershipResponse),
        (status = 400, description = "Product cannot be redeemed", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "buyProduct"
)]
#[post("/products/{product_id}/buy")]
pub async fn buy_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<OwnershipResponse>> {
    let user_id = session.require_user_id()?;
    let product_id = ProductId::new(path.into_inner());
    let ownership = state.redemption.purchase(user_id, product_id).await?;
    Ok(web::Json(ownership.into()))
}

/// Ownership records of the authenticated user, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/products",
    responses(
        (status = 200, description = "Owned products", body = [OwnershipResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["products"],
    operation_id = "listMyProducts"
)]
#[get("/users/me/products")]
pub async fn my_products(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OwnershipResponse>>> {
    let user_id = session.require_user_id()?;
    let owned = state.redemption.owned_products(user_id).await?;
    Ok(web::Json(owned.into_iter().map(Into::into).collect()))
}
