use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "generation_manifests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub generated_at: String,
    pub status: String, // complete / partial
    pub failed_table: Option<String>,
    pub manifest_json: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
