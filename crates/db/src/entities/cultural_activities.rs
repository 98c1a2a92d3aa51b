//! `SeaORM` Entity for cultural_activities table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cultural_activities")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    /// quiz, learning_module, contribution
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Quiz questions or learning material.
    pub content: Json,
    pub points_reward: i32,
    pub image_url: Option<String>,
    /// beginner, intermediate, advanced
    pub difficulty: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_activities::Entity")]
    Completions,
}

impl Related<super::user_activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Completions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
