use crate::generate::model::{
    Customer, Dataset, DatasetKind, Employee, FinancialPeriod, OperationRecord, SalesTransaction,
};
use crate::storage::entity::{
    customer, employee, financial_statement, operation, sales_transaction, CustomerRow,
    EmployeeRow, FinancialStatementRow, OperationRow, SalesTransactionRow,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, Set, TransactionTrait,
};

// SQLite 单条语句变量上限 32766，按 ~20 列估算
const INSERT_CHUNK: usize = 500;

fn customer_model(c: &Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        customer_id: Set(c.customer_id.clone()),
        first_name: Set(c.first_name.clone()),
        last_name: Set(c.last_name.clone()),
        email: Set(c.email.clone()),
        age: Set(c.age as i32),
        gender: Set(c.gender.clone()),
        income: Set(c.income),
        education: Set(c.education.clone()),
        city: Set(c.city.clone()),
        state: Set(c.state.clone()),
        country: Set(c.country.clone()),
        registration_date: Set(c.registration_date.to_string()),
        customer_segment: Set(c.customer_segment.clone()),
        lifetime_value: Set(c.lifetime_value),
        churn_probability: Set(c.churn_probability),
        satisfaction_score: Set(c.satisfaction_score),
        acquisition_channel: Set(c.acquisition_channel.clone()),
    }
}

fn sales_model(t: &SalesTransaction) -> sales_transaction::ActiveModel {
    sales_transaction::ActiveModel {
        transaction_id: Set(t.transaction_id.clone()),
        customer_id: Set(t.customer_id.clone()),
        product_id: Set(t.product_id.clone()),
        category: Set(t.category.clone()),
        quantity: Set(t.quantity as i32),
        unit_price: Set(t.unit_price),
        discount: Set(t.discount),
        transaction_date: Set(t.transaction_date.format("%Y-%m-%dT%H:%M:%S").to_string()),
        sales_rep: Set(t.sales_rep.clone()),
        region: Set(t.region.clone()),
        channel: Set(t.channel.clone()),
        payment_method: Set(t.payment_method.clone()),
        gross_revenue: Set(t.gross_revenue),
        net_revenue: Set(t.net_revenue),
        profit_margin: Set(t.profit_margin),
        profit: Set(t.profit),
    }
}

fn employee_model(e: &Employee) -> employee::ActiveModel {
    employee::ActiveModel {
        employee_id: Set(e.employee_id.clone()),
        first_name: Set(e.first_name.clone()),
        last_name: Set(e.last_name.clone()),
        email: Set(e.email.clone()),
        department: Set(e.department.clone()),
        position: Set(e.position.clone()),
        hire_date: Set(e.hire_date.to_string()),
        salary: Set(e.salary),
        performance_score: Set(e.performance_score),
        satisfaction_score: Set(e.satisfaction_score),
        training_hours: Set(e.training_hours as i32),
        projects_completed: Set(e.projects_completed as i32),
        absenteeism_days: Set(e.absenteeism_days as i32),
        overtime_hours: Set(e.overtime_hours),
        manager_id: Set(e.manager_id.clone()),
        tenure_years: Set(e.tenure_years),
        promotion_eligible: Set(e.promotion_eligible),
        flight_risk: Set(e.flight_risk),
    }
}

fn financial_model(f: &FinancialPeriod) -> financial_statement::ActiveModel {
    financial_statement::ActiveModel {
        period: Set(f.period.clone()),
        date: Set(f.date.to_string()),
        revenue: Set(f.revenue),
        cost_of_goods_sold: Set(f.cost_of_goods_sold),
        gross_profit: Set(f.gross_profit),
        operating_expenses: Set(f.operating_expenses),
        ebitda: Set(f.ebitda),
        depreciation: Set(f.depreciation),
        interest_expense: Set(f.interest_expense),
        tax_rate: Set(f.tax_rate),
        cash_flow: Set(f.cash_flow),
        accounts_receivable: Set(f.accounts_receivable),
        inventory: Set(f.inventory),
        accounts_payable: Set(f.accounts_payable),
        working_capital: Set(f.working_capital),
        gross_margin: Set(f.gross_margin),
        operating_margin: Set(f.operating_margin),
        net_income: Set(f.net_income),
        net_margin: Set(f.net_margin),
        roa: Set(f.roa),
        current_ratio: Set(f.current_ratio),
    }
}

fn operation_model(o: &OperationRecord) -> operation::ActiveModel {
    operation::ActiveModel {
        operation_id: Set(o.operation_id.clone()),
        date: Set(o.date.to_string()),
        supplier: Set(o.supplier.clone()),
        warehouse: Set(o.warehouse.clone()),
        product_id: Set(o.product_id.clone()),
        order_quantity: Set(o.order_quantity as i32),
        received_quantity: Set(o.received_quantity as i32),
        lead_time_days: Set(o.lead_time_days),
        unit_cost: Set(o.unit_cost),
        quality_score: Set(o.quality_score),
        delivery_performance: Set(o.delivery_performance),
        inventory_turnover: Set(o.inventory_turnover),
        stockout_incidents: Set(o.stockout_incidents as i32),
        carrying_cost_rate: Set(o.carrying_cost_rate),
        demand_forecast: Set(o.demand_forecast),
        actual_demand: Set(o.actual_demand),
        forecast_accuracy: Set(o.forecast_accuracy),
        total_cost: Set(o.total_cost),
        carrying_cost: Set(o.carrying_cost),
    }
}

/// 先清空再分批插入，调用方负责事务
async fn replace_rows<E, A>(txn: &DatabaseTransaction, models: Vec<A>) -> Result<u64, DbErr>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E> + Send,
    E::Model: IntoActiveModel<A>,
{
    E::delete_many().exec(txn).await?;
    let mut inserted = 0u64;
    let mut iter = models.into_iter().peekable();
    while iter.peek().is_some() {
        let chunk: Vec<A> = iter.by_ref().take(INSERT_CHUNK).collect();
        inserted += E::insert_many(chunk).exec_without_returning(txn).await?;
    }
    Ok(inserted)
}

pub struct TableRepository;

impl TableRepository {
    /// 在单个事务内整表替换；失败时回滚，旧数据保持不变
    pub async fn replace(db: &DatabaseConnection, dataset: &Dataset<'_>) -> Result<u64, DbErr> {
        let txn = db.begin().await?;
        let inserted = match *dataset {
            Dataset::Customers(rows) => {
                replace_rows::<CustomerRow, _>(&txn, rows.iter().map(customer_model).collect())
                    .await?
            }
            Dataset::Sales(rows) => {
                replace_rows::<SalesTransactionRow, _>(&txn, rows.iter().map(sales_model).collect())
                    .await?
            }
            Dataset::Employees(rows) => {
                replace_rows::<EmployeeRow, _>(&txn, rows.iter().map(employee_model).collect())
                    .await?
            }
            Dataset::Financial(rows) => {
                replace_rows::<FinancialStatementRow, _>(
                    &txn,
                    rows.iter().map(financial_model).collect(),
                )
                .await?
            }
            Dataset::Operations(rows) => {
                replace_rows::<OperationRow, _>(&txn, rows.iter().map(operation_model).collect())
                    .await?
            }
        };
        txn.commit().await?;
        Ok(inserted)
    }

    pub async fn clear(db: &DatabaseConnection, kind: DatasetKind) -> Result<u64, DbErr> {
        let res = match kind {
            DatasetKind::Customers => CustomerRow::delete_many().exec(db).await?,
            DatasetKind::Sales => SalesTransactionRow::delete_many().exec(db).await?,
            DatasetKind::Employees => EmployeeRow::delete_many().exec(db).await?,
            DatasetKind::Financial => FinancialStatementRow::delete_many().exec(db).await?,
            DatasetKind::Operations => OperationRow::delete_many().exec(db).await?,
        };
        Ok(res.rows_affected)
    }

    pub async fn count(db: &DatabaseConnection, kind: DatasetKind) -> Result<u64, DbErr> {
        match kind {
            DatasetKind::Customers => CustomerRow::find().count(db).await,
            DatasetKind::Sales => SalesTransactionRow::find().count(db).await,
            DatasetKind::Employees => EmployeeRow::find().count(db).await,
            DatasetKind::Financial => FinancialStatementRow::find().count(db).await,
            DatasetKind::Operations => OperationRow::find().count(db).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn employee_root_keeps_null_manager() {
        let e = Employee {
            employee_id: "EMP_00001".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
            position: "VP".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 2, 3).unwrap(),
            salary: 120_000.0,
            performance_score: 4.2,
            satisfaction_score: 8.0,
            training_hours: 40,
            projects_completed: 9,
            absenteeism_days: 2,
            overtime_hours: 3.5,
            manager_id: None,
            tenure_years: 5.0,
            promotion_eligible: true,
            flight_risk: 0.1,
        };
        let am = employee_model(&e);
        assert_eq!(am.manager_id, Set(None));
        assert_eq!(am.hire_date, Set("2020-02-03".to_string()));
    }
}
