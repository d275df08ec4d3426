use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_statements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub period: String, // YYYY-MM
    pub date: String,
    pub revenue: f64,
    pub cost_of_goods_sold: f64,
    pub gross_profit: f64,
    pub operating_expenses: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub interest_expense: f64,
    pub tax_rate: f64,
    pub cash_flow: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub accounts_payable: f64,
    pub working_capital: f64,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_income: f64,
    pub net_margin: f64,
    pub roa: f64,
    pub current_ratio: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
