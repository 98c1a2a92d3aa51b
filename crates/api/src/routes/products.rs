//! Marketplace product routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use druk_core::marketplace::reward_badge;
use druk_db::ProductRepository;
use druk_db::entities::products;
use druk_db::repositories::{CreateProductInput, ProductFilter};
use druk_shared::form::blank_as_none;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, ValidatedJson};

/// Creates the product router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}

/// A product with its display badge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    /// The stored product.
    #[serde(flatten)]
    pub product: products::Model,
    /// `+N Points` when the product grants points.
    pub reward_badge: Option<String>,
}

impl From<products::Model> for ProductView {
    fn from(product: products::Model) -> Self {
        Self {
            reward_badge: reward_badge(product.brownie_points_reward),
            product,
        }
    }
}

/// Product listing form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Seller; defaults to the demo user.
    pub seller_id: Option<i32>,
    /// Name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Price in Ngultrum.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// Picture.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url)]
    pub image_url: Option<String>,
    /// Category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Points granted on purchase.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub brownie_points_reward: i32,
}

fn non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Product list filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Category.
    pub category: Option<String>,
    /// Seller.
    pub seller_id: Option<i32>,
}

/// GET /products?category=&sellerId=
async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> ApiResult<Json<Vec<ProductView>>> {
    let filter = ProductFilter {
        category: query.category.filter(|c| !c.trim().is_empty()),
        seller_id: query.seller_id,
    };

    let repo = ProductRepository::new(&state.db);
    let products = repo.list(&filter).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductView>)> {
    let repo = ProductRepository::new(&state.db);

    let product = repo
        .create(CreateProductInput {
            seller_id: state.actor(payload.seller_id),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            image_url: payload.image_url,
            category: payload.category,
            brownie_points_reward: payload.brownie_points_reward,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}
