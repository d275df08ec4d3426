use crate::generate::error::{checked_count, GenerateError};
use crate::generate::model::FinancialPeriod;
use crate::generate::sampling::{dist_err, DegenerateTally};
use chrono::{Datelike, Months, NaiveDate};
use log::info;
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

/// 每期抽样得到的基础字段，比率类字段都从这里代数推导
#[derive(Debug, Clone)]
pub struct PeriodDraw {
    pub date: NaiveDate,
    pub revenue: f64,
    pub cost_of_goods_sold: f64,
    pub operating_expenses: f64,
    pub depreciation: f64,
    pub interest_expense: f64,
    pub tax_rate: f64,
    pub cash_flow: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub accounts_payable: f64,
    pub working_capital: f64,
}

impl FinancialPeriod {
    pub fn from_draw(d: PeriodDraw, tally: &mut DegenerateTally) -> Self {
        let period = d.date.format("%Y-%m").to_string();
        let gross_profit = d.revenue - d.cost_of_goods_sold;
        let ebitda = gross_profit - d.operating_expenses;
        let net_income = (ebitda - d.depreciation - d.interest_expense) * (1.0 - d.tax_rate);

        let gross_margin = tally.ratio(gross_profit, d.revenue, &period, "gross_margin");
        let operating_margin = tally.ratio(ebitda, d.revenue, &period, "operating_margin");
        let net_margin = tally.ratio(net_income, d.revenue, &period, "net_margin");
        // 简化 ROA：总资产按 2 倍营收估算
        let roa = tally.ratio(net_income, d.revenue * 2.0, &period, "roa");
        let current_ratio = tally.ratio(
            d.cash_flow + d.accounts_receivable,
            d.accounts_payable,
            &period,
            "current_ratio",
        );

        Self {
            period,
            date: d.date,
            revenue: d.revenue,
            cost_of_goods_sold: d.cost_of_goods_sold,
            gross_profit,
            operating_expenses: d.operating_expenses,
            ebitda,
            depreciation: d.depreciation,
            interest_expense: d.interest_expense,
            tax_rate: d.tax_rate,
            cash_flow: d.cash_flow,
            accounts_receivable: d.accounts_receivable,
            inventory: d.inventory,
            accounts_payable: d.accounts_payable,
            working_capital: d.working_capital,
            gross_margin,
            operating_margin,
            net_income,
            net_margin,
            roa,
            current_ratio,
        }
    }
}

/// 连续的自然月序列，从 base_month 所在月的 1 日开始
pub fn month_sequence(base_month: NaiveDate, count: usize) -> Result<Vec<NaiveDate>, GenerateError> {
    let first = base_month
        .with_day(1)
        .ok_or_else(|| GenerateError::invalid(format!("bad base month {base_month}")))?;
    (0..count)
        .map(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|m| first.checked_add_months(Months::new(m)))
                .ok_or_else(|| GenerateError::invalid(format!("period {i} overflows calendar")))
        })
        .collect()
}

fn normal(what: &'static str, mean: f64, std_dev: f64) -> Result<Normal<f64>, GenerateError> {
    Normal::new(mean, std_dev).map_err(dist_err(what))
}

/// 每期抽样顺序：revenue, cogs 比例, opex 比例, depreciation, interest_expense,
/// tax_rate, cash_flow, accounts_receivable, inventory, accounts_payable,
/// working_capital
pub fn generate_financial_periods<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    base_month: NaiveDate,
    tally: &mut DegenerateTally,
) -> Result<Vec<FinancialPeriod>, GenerateError> {
    let n = checked_count("financial", count)?;
    let months = month_sequence(base_month, n)?;
    let revenue_dist = LogNormal::new(15.0, 0.2).map_err(dist_err("revenue"))?;
    info!("开始生成财务数据: {} 期，起始 {}", n, base_month.format("%Y-%m"));

    let mut rows = Vec::with_capacity(n);
    for date in months {
        let revenue = revenue_dist.sample(rng);
        let cogs = revenue * rng.gen_range(0.4..0.6);
        let operating_expenses = revenue * rng.gen_range(0.2..0.4);
        let depreciation = revenue * rng.gen_range(0.02..0.05);
        let interest_expense = revenue * rng.gen_range(0.01..0.03);
        let tax_rate = rng.gen_range(0.2..0.3);
        let cash_flow = normal("cash_flow", revenue * 0.15, revenue * 0.05)?.sample(rng);
        let accounts_receivable = revenue * rng.gen_range(0.1..0.2);
        let inventory = cogs * rng.gen_range(0.15..0.25);
        let accounts_payable = cogs * rng.gen_range(0.08..0.15);
        let working_capital = normal("working_capital", revenue * 0.1, revenue * 0.03)?.sample(rng);

        rows.push(FinancialPeriod::from_draw(
            PeriodDraw {
                date,
                revenue,
                cost_of_goods_sold: cogs,
                operating_expenses,
                depreciation,
                interest_expense,
                tax_rate,
                cash_flow,
                accounts_receivable,
                inventory,
                accounts_payable,
                working_capital,
            },
            tally,
        ));
    }

    info!("财务数据生成完成: {} 期", rows.len());
    Ok(rows)
}
