//! Marketplace product repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::info;

use super::constraint::is_foreign_key_violation;
use crate::entities::products;

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Price or reward below zero.
    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// The seller does not exist.
    #[error("Unknown seller: {0}")]
    UnknownSeller(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for listing a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Selling user.
    pub seller_id: i32,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Price in Ngultrum.
    pub price: Decimal,
    /// Optional picture.
    pub image_url: Option<String>,
    /// Marketplace category.
    pub category: String,
    /// Points granted on purchase; zero for none.
    pub brownie_points_reward: i32,
}

/// Product listing filter. `None` fields are not filtered on.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Only this seller's products.
    pub seller_id: Option<i32>,
}

/// Product repository.
#[derive(Debug, Clone, Copy)]
pub struct ProductRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductRepository<'a> {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a product as in stock.
    ///
    /// # Errors
    ///
    /// Returns `Negative` for a negative price or reward and `UnknownSeller`
    /// if the seller does not exist.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        if input.price < Decimal::ZERO {
            return Err(ProductError::Negative("price"));
        }
        if input.brownie_points_reward < 0 {
            return Err(ProductError::Negative("browniePointsReward"));
        }

        let seller_id = input.seller_id;
        let product = products::ActiveModel {
            seller_id: Set(input.seller_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price.round_dp(2)),
            image_url: Set(input.image_url),
            category: Set(input.category),
            brownie_points_reward: Set(input.brownie_points_reward),
            in_stock: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let product = product.insert(self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                ProductError::UnknownSeller(seller_id)
            } else {
                ProductError::Database(e)
            }
        })?;

        info!(product_id = product.id, seller_id, "Product listed");
        Ok(product)
    }

    /// Lists in-stock products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<products::Model>, DbErr> {
        let mut query = products::Entity::find().filter(products::Column::InStock.eq(true));

        if let Some(category) = &filter.category {
            query = query.filter(products::Column::Category.eq(category.as_str()));
        }
        if let Some(seller_id) = filter.seller_id {
            query = query.filter(products::Column::SellerId.eq(seller_id));
        }

        query
            .order_by_desc(products::Column::CreatedAt)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn input(price: Decimal, reward: i32) -> CreateProductInput {
        CreateProductInput {
            seller_id: 1,
            name: "Red rice".to_string(),
            description: "Paro valley red rice, 5kg".to_string(),
            price,
            image_url: None,
            category: "Food".to_string(),
            brownie_points_reward: reward,
        }
    }

    fn product(reward: i32) -> products::Model {
        products::Model {
            id: 1,
            seller_id: 1,
            name: "Red rice".to_string(),
            description: "Paro valley red rice, 5kg".to_string(),
            price: dec!(450.00),
            image_url: None,
            category: "Food".to_string(),
            brownie_points_reward: reward,
            in_stock: true,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_zero_reward_is_accepted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[product(0)]])
            .into_connection();
        let repo = ProductRepository::new(&db);

        let created = repo.create(input(dec!(450), 0)).await.unwrap();
        assert_eq!(created.brownie_points_reward, 0);
    }

    #[tokio::test]
    async fn test_negative_price_rejected_before_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = ProductRepository::new(&db);

        let err = repo.create(input(dec!(-1), 0)).await.unwrap_err();
        assert!(matches!(err, ProductError::Negative("price")));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_negative_reward_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = ProductRepository::new(&db);

        let err = repo.create(input(dec!(10), -3)).await.unwrap_err();
        assert!(matches!(err, ProductError::Negative("browniePointsReward")));
    }

    #[tokio::test]
    async fn test_list_filters_in_stock_and_seller() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[product(50)]])
            .into_connection();
        let repo = ProductRepository::new(&db);

        let filter = ProductFilter {
            category: None,
            seller_id: Some(1),
        };
        let listed = repo.list(&filter).await.unwrap();
        assert_eq!(listed.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("in_stock"));
        assert!(log.contains("seller_id\\\" ="));
    }
}
