use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub operation_id: String,
    pub date: String,
    pub supplier: String,
    pub warehouse: String,
    pub product_id: String,
    pub order_quantity: i32,
    pub received_quantity: i32,
    pub lead_time_days: f64,
    pub unit_cost: f64,
    pub quality_score: f64,
    pub delivery_performance: f64,
    pub inventory_turnover: f64,
    pub stockout_incidents: i32,
    pub carrying_cost_rate: f64,
    pub demand_forecast: f64,
    pub actual_demand: f64,
    pub forecast_accuracy: f64,
    pub total_cost: f64,
    pub carrying_cost: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
