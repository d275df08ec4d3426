use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub gender: String,
    pub income: f64,
    pub education: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub registration_date: String, // YYYY-MM-DD
    pub customer_segment: String,
    pub lifetime_value: f64,
    pub churn_probability: f64,
    pub satisfaction_score: f64,
    pub acquisition_channel: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
