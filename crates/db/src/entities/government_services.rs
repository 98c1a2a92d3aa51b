//! `SeaORM` Entity for government_services table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "government_services")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub service_name: String,
    pub description: String,
    pub department: String,
    pub contract_address: Option<String>,
    pub is_active: bool,
    pub required_credentials: Json,
    pub processing_time: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub fee: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
