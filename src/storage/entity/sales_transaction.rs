use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaction_id: String,
    pub customer_id: String, // 软引用，不建外键
    pub product_id: String,
    pub category: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub discount: f64,
    pub transaction_date: String, // YYYY-MM-DDTHH:MM:SS
    pub sales_rep: String,
    pub region: String,
    pub channel: String,
    pub payment_method: String,
    pub gross_revenue: f64,
    pub net_revenue: f64,
    pub profit_margin: f64,
    pub profit: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
