//! Read-only catalogs: mini-apps and government services.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{government_services, mini_apps};

/// Catalog repository.
#[derive(Debug, Clone, Copy)]
pub struct CatalogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CatalogRepository<'a> {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active mini-apps, most downloaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn mini_apps(&self) -> Result<Vec<mini_apps::Model>, DbErr> {
        mini_apps::Entity::find()
            .filter(mini_apps::Column::Active.eq(true))
            .order_by_desc(mini_apps::Column::Downloads)
            .order_by_asc(mini_apps::Column::Id)
            .all(self.db)
            .await
    }

    /// Lists active government services by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn government_services(&self) -> Result<Vec<government_services::Model>, DbErr> {
        government_services::Entity::find()
            .filter(government_services::Column::IsActive.eq(true))
            .order_by_asc(government_services::Column::ServiceName)
            .all(self.db)
            .await
    }
}
