use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub hire_date: String,
    pub salary: f64,
    pub performance_score: f64,
    pub satisfaction_score: f64,
    pub training_hours: i32,
    pub projects_completed: i32,
    pub absenteeism_days: i32,
    pub overtime_hours: f64,
    #[sea_orm(nullable)]
    pub manager_id: Option<String>,
    pub tenure_years: f64,
    pub promotion_eligible: bool,
    pub flight_risk: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
