use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 一行可序列化的表记录，`COLUMNS` 与 serde 字段名保持一致（CSV 表头顺序）
pub trait Record: Serialize {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Customers,
    Sales,
    Employees,
    Financial,
    Operations,
}

impl DatasetKind {
    /// 固定的生成顺序
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::Customers,
        DatasetKind::Sales,
        DatasetKind::Employees,
        DatasetKind::Financial,
        DatasetKind::Operations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Customers => "customers",
            DatasetKind::Sales => "sales",
            DatasetKind::Employees => "employees",
            DatasetKind::Financial => "financial",
            DatasetKind::Operations => "operations",
        }
    }

    /// 落盘名（CSV 文件名 / SQLite 表名共用）
    pub fn table_name(&self) -> &'static str {
        match self {
            DatasetKind::Customers => "customers",
            DatasetKind::Sales => "sales_transactions",
            DatasetKind::Employees => "employees",
            DatasetKind::Financial => "financial_statements",
            DatasetKind::Operations => "operations",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Customers => Customer::COLUMNS,
            DatasetKind::Sales => SalesTransaction::COLUMNS,
            DatasetKind::Employees => Employee::COLUMNS,
            DatasetKind::Financial => FinancialPeriod::COLUMNS,
            DatasetKind::Operations => OperationRecord::COLUMNS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub income: f64,
    pub education: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub registration_date: NaiveDate,
    pub customer_segment: String,
    pub lifetime_value: f64,
    pub churn_probability: f64,
    pub satisfaction_score: f64,
    pub acquisition_channel: String,
}

impl Record for Customer {
    const COLUMNS: &'static [&'static str] = &[
        "customer_id",
        "first_name",
        "last_name",
        "email",
        "age",
        "gender",
        "income",
        "education",
        "city",
        "state",
        "country",
        "registration_date",
        "customer_segment",
        "lifetime_value",
        "churn_probability",
        "satisfaction_score",
        "acquisition_channel",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTransaction {
    pub transaction_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount: f64,
    pub transaction_date: NaiveDateTime,
    pub sales_rep: String,
    pub region: String,
    pub channel: String,
    pub payment_method: String,
    pub gross_revenue: f64,
    pub net_revenue: f64,
    pub profit_margin: f64,
    pub profit: f64,
}

impl Record for SalesTransaction {
    const COLUMNS: &'static [&'static str] = &[
        "transaction_id",
        "customer_id",
        "product_id",
        "category",
        "quantity",
        "unit_price",
        "discount",
        "transaction_date",
        "sales_rep",
        "region",
        "channel",
        "payment_method",
        "gross_revenue",
        "net_revenue",
        "profit_margin",
        "profit",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub performance_score: f64,
    pub satisfaction_score: f64,
    pub training_hours: u32,
    pub projects_completed: u32,
    pub absenteeism_days: u32,
    pub overtime_hours: f64,
    pub manager_id: Option<String>,
    pub tenure_years: f64,
    pub promotion_eligible: bool,
    pub flight_risk: f64,
}

impl Record for Employee {
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "first_name",
        "last_name",
        "email",
        "department",
        "position",
        "hire_date",
        "salary",
        "performance_score",
        "satisfaction_score",
        "training_hours",
        "projects_completed",
        "absenteeism_days",
        "overtime_hours",
        "manager_id",
        "tenure_years",
        "promotion_eligible",
        "flight_risk",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub period: String,
    pub date: NaiveDate,
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

impl Record for FinancialPeriod {
    const COLUMNS: &'static [&'static str] = &[
        "period",
        "date",
        "revenue",
        "cost_of_goods_sold",
        "gross_profit",
        "operating_expenses",
        "ebitda",
        "depreciation",
        "interest_expense",
        "tax_rate",
        "cash_flow",
        "accounts_receivable",
        "inventory",
        "accounts_payable",
        "working_capital",
        "gross_margin",
        "operating_margin",
        "net_income",
        "net_margin",
        "roa",
        "current_ratio",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub operation_id: String,
    pub date: NaiveDate,
    pub supplier: String,
    pub warehouse: String,
    pub product_id: String,
    pub order_quantity: u32,
    pub received_quantity: u32,
    pub lead_time_days: f64,
    pub unit_cost: f64,
    pub quality_score: f64,
    pub delivery_performance: f64,
    pub inventory_turnover: f64,
    pub stockout_incidents: u32,
    pub carrying_cost_rate: f64,
    pub demand_forecast: f64,
    pub actual_demand: f64,
    pub forecast_accuracy: f64,
    pub total_cost: f64,
    pub carrying_cost: f64,
}

impl Record for OperationRecord {
    const COLUMNS: &'static [&'static str] = &[
        "operation_id",
        "date",
        "supplier",
        "warehouse",
        "product_id",
        "order_quantity",
        "received_quantity",
        "lead_time_days",
        "unit_cost",
        "quality_score",
        "delivery_performance",
        "inventory_turnover",
        "stockout_incidents",
        "carrying_cost_rate",
        "demand_forecast",
        "actual_demand",
        "forecast_accuracy",
        "total_cost",
        "carrying_cost",
    ];
}

/// 单张已生成表的借用视图，交给 `TableStore` 落盘
#[derive(Debug, Clone, Copy)]
pub enum Dataset<'a> {
    Customers(&'a [Customer]),
    Sales(&'a [SalesTransaction]),
    Employees(&'a [Employee]),
    Financial(&'a [FinancialPeriod]),
    Operations(&'a [OperationRecord]),
}

impl Dataset<'_> {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Customers(_) => DatasetKind::Customers,
            Dataset::Sales(_) => DatasetKind::Sales,
            Dataset::Employees(_) => DatasetKind::Employees,
            Dataset::Financial(_) => DatasetKind::Financial,
            Dataset::Operations(_) => DatasetKind::Operations,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Customers(rows) => rows.len(),
            Dataset::Sales(rows) => rows.len(),
            Dataset::Employees(rows) => rows.len(),
            Dataset::Financial(rows) => rows.len(),
            Dataset::Operations(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_distinct() {
        let mut names: Vec<&str> = DatasetKind::ALL.iter().map(|k| k.table_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn generation_order_is_fixed() {
        let order: Vec<&str> = DatasetKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            order,
            vec!["customers", "sales", "employees", "financial", "operations"]
        );
    }
}
