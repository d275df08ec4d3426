use crate::generate::error::GenerateError;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Csv,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(StoreKind::Csv),
            "sqlite" | "db" => Ok(StoreKind::Sqlite),
            other => Err(GenerateError::invalid(format!(
                "unknown store '{other}', expected csv or sqlite"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub customers: i64,
    pub sales: i64,
    pub employees: i64,
    pub financial_periods: i64,
    pub operations: i64,
}

impl Default for TableCounts {
    fn default() -> Self {
        Self {
            customers: 10_000,
            sales: 50_000,
            employees: 1_000,
            financial_periods: 36,
            operations: 5_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub counts: TableCounts,
    /// sales.customer_id 的取值空间 CUST_000001..=CUST_{space}
    pub customer_id_space: i64,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub hire_start: NaiveDate,
    pub hire_end: NaiveDate,
    /// 经理只从前 manager_pool 名员工中抽取
    pub manager_pool: i64,
    /// 财务期起始月份（取当月 1 日）
    pub base_month: NaiveDate,
    pub store: StoreKind,
    pub output_dir: PathBuf,
    pub database_url: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let counts = TableCounts::default();
        Self {
            seed: 42,
            customer_id_space: counts.customers,
            counts,
            window_start: ymd(2022, 1, 1),
            window_end: ymd(2025, 6, 30),
            hire_start: ymd(2020, 1, 1),
            hire_end: ymd(2025, 1, 1),
            manager_pool: 99,
            base_month: ymd(2022, 1, 1),
            store: StoreKind::Csv,
            output_dir: PathBuf::from("data"),
            database_url: "sqlite://data/business.db?mode=rwc".to_string(),
        }
    }
}

// 常量日期，均为合法日期
fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn parse_month(s: &str) -> Result<NaiveDate, GenerateError> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| GenerateError::invalid(format!("month '{s}' is not YYYY-MM")))
}

pub fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, GenerateError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| GenerateError::invalid(format!("{key}: cannot parse '{raw}'")))
}

impl GeneratorConfig {
    /// 默认值之上叠加环境变量（调用方负责先加载 .env）
    pub fn from_env() -> Result<Self, GenerateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut id_space_set = false;

        if let Some(v) = lookup("BIZGEN_SEED") {
            cfg.seed = parse_value("BIZGEN_SEED", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_CUSTOMERS") {
            cfg.counts.customers = parse_value("BIZGEN_CUSTOMERS", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_SALES") {
            cfg.counts.sales = parse_value("BIZGEN_SALES", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_EMPLOYEES") {
            cfg.counts.employees = parse_value("BIZGEN_EMPLOYEES", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_PERIODS") {
            cfg.counts.financial_periods = parse_value("BIZGEN_PERIODS", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_OPERATIONS") {
            cfg.counts.operations = parse_value("BIZGEN_OPERATIONS", &v)?;
        }
        if let Some(v) = lookup("BIZGEN_CUSTOMER_ID_SPACE") {
            cfg.customer_id_space = parse_value("BIZGEN_CUSTOMER_ID_SPACE", &v)?;
            id_space_set = true;
        }
        if let Some(v) = lookup("BIZGEN_BASE_MONTH") {
            cfg.base_month = parse_month(&v)?;
        }
        if let Some(v) = lookup("BIZGEN_STORE") {
            cfg.store = v.parse()?;
        }
        if let Some(v) = lookup("BIZGEN_OUTPUT_DIR") {
            cfg.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("DATABASE_URL") {
            cfg.database_url = v;
        }

        if !id_space_set {
            cfg.customer_id_space = cfg.counts.customers;
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        let c = &self.counts;
        for (name, n) in [
            ("customers", c.customers),
            ("sales", c.sales),
            ("employees", c.employees),
            ("financial", c.financial_periods),
            ("operations", c.operations),
        ] {
            if n < 0 {
                return Err(GenerateError::invalid(format!(
                    "{name} count must be >= 0, got {n}"
                )));
            }
        }
        if self.window_start > self.window_end {
            return Err(GenerateError::invalid(format!(
                "window start {} is after end {}",
                self.window_start, self.window_end
            )));
        }
        if self.hire_start > self.hire_end {
            return Err(GenerateError::invalid(format!(
                "hire window start {} is after end {}",
                self.hire_start, self.hire_end
            )));
        }
        if c.sales > 0 && self.customer_id_space <= 0 {
            return Err(GenerateError::invalid(
                "customer id space must be > 0 when generating sales",
            ));
        }
        if c.employees > 1 && self.manager_pool <= 0 {
            return Err(GenerateError::invalid(
                "manager pool must be > 0 when generating more than one employee",
            ));
        }
        Ok(())
    }
}
