use crate::config::GeneratorConfig;
use crate::generate::customers::generate_customers;
use crate::generate::employees::{generate_employees, EmployeeParams};
use crate::generate::error::GenerateError;
use crate::generate::financial::generate_financial_periods;
use crate::generate::model::{
    Customer, Dataset, DatasetKind, Employee, FinancialPeriod, OperationRecord,
    SalesTransaction,
};
use crate::generate::operations::generate_operations;
use crate::generate::sales::generate_sales;
use crate::generate::sampling::DegenerateTally;
use crate::manifest::Manifest;
use crate::storage::TableStore;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 持有唯一的随机流；五张表按固定顺序依次消费它。
///
/// 不要在多个并发调用间共享同一个实例，否则结果不再可复现。
pub struct BusinessDataGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    now: DateTime<Utc>,
    tally: DegenerateTally,
}

impl BusinessDataGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            now: Utc::now(),
            tally: DegenerateTally::default(),
        }
    }

    /// 固定“当前时间”（司龄计算与清单时间戳）
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// 回到种子初始状态，使每次完整运行都从同一随机流开始
    pub fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.tally = DegenerateTally::default();
    }

    pub fn degenerate_fallbacks(&self) -> usize {
        self.tally.fallbacks
    }

    pub fn generate_customers(&mut self, count: i64) -> Result<Vec<Customer>, GenerateError> {
        generate_customers(
            &mut self.rng,
            count,
            self.config.window_start,
            self.config.window_end,
        )
    }

    pub fn generate_sales(&mut self, count: i64) -> Result<Vec<SalesTransaction>, GenerateError> {
        generate_sales(
            &mut self.rng,
            count,
            self.config.customer_id_space,
            self.config.window_start,
            self.config.window_end,
        )
    }

    pub fn generate_employees(&mut self, count: i64) -> Result<Vec<Employee>, GenerateError> {
        let params = EmployeeParams {
            hire_start: self.config.hire_start,
            hire_end: self.config.hire_end,
            manager_pool: self.config.manager_pool,
            as_of: self.now.date_naive(),
        };
        generate_employees(&mut self.rng, count, &params)
    }

    pub fn generate_financial_periods(
        &mut self,
        count: i64,
    ) -> Result<Vec<FinancialPeriod>, GenerateError> {
        generate_financial_periods(&mut self.rng, count, self.config.base_month, &mut self.tally)
    }

    pub fn generate_operations(
        &mut self,
        count: i64,
    ) -> Result<Vec<OperationRecord>, GenerateError> {
        generate_operations(
            &mut self.rng,
            count,
            self.config.window_start,
            self.config.window_end,
            &mut self.tally,
        )
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedData {
    pub customers: Vec<Customer>,
    pub sales: Vec<SalesTransaction>,
    pub employees: Vec<Employee>,
    pub financial: Vec<FinancialPeriod>,
    pub operations: Vec<OperationRecord>,
    pub manifest: Manifest,
}

struct GeneratedTables {
    customers: Vec<Customer>,
    sales: Vec<SalesTransaction>,
    employees: Vec<Employee>,
    financial: Vec<FinancialPeriod>,
    operations: Vec<OperationRecord>,
}

type TableFailure = (DatasetKind, GenerateError);

fn at(kind: DatasetKind) -> impl FnOnce(GenerateError) -> TableFailure {
    move |e| (kind, e)
}

pub struct GeneratorService<S: TableStore> {
    generator: BusinessDataGenerator,
    store: S,
}

impl<S: TableStore> GeneratorService<S> {
    pub fn new(generator: BusinessDataGenerator, store: S) -> Self {
        Self { generator, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 按 customers → sales → employees → financial → operations 顺序生成并逐表落盘，
    /// 最后写清单。每次调用都从种子重新开始。
    ///
    /// 某张表生成或写入失败时，已写入的表保留，本次未写成的表从存储中清除，
    /// 清单标记为 partial 后返回错误。
    pub async fn generate_all(&mut self) -> Result<GeneratedData, GenerateError> {
        self.generator.config().validate()?;
        self.generator.reset();
        let mut manifest = Manifest::new(self.generator.now(), self.generator.config().seed);
        info!(
            "开始生成全部业务数据 (seed={}, 目标={})",
            manifest.seed,
            self.store.describe()
        );

        let tables = match self.run_tables(&mut manifest).await {
            Ok(tables) => tables,
            Err((kind, e)) => {
                error!("{} 失败，本次运行中止: {}", kind.name(), e);
                self.abandon(kind, &mut manifest).await;
                return Err(e);
            }
        };

        manifest.degenerate_fallbacks = self.generator.degenerate_fallbacks();
        self.store
            .write_manifest(&manifest)
            .await
            .map_err(|e| GenerateError::storage("manifest", e))?;
        info!("全部数据生成完成");

        Ok(GeneratedData {
            customers: tables.customers,
            sales: tables.sales,
            employees: tables.employees,
            financial: tables.financial,
            operations: tables.operations,
            manifest,
        })
    }

    async fn run_tables(
        &mut self,
        manifest: &mut Manifest,
    ) -> Result<GeneratedTables, TableFailure> {
        let counts = self.generator.config().counts;

        let customers = self
            .generator
            .generate_customers(counts.customers)
            .map_err(at(DatasetKind::Customers))?;
        self.persist(Dataset::Customers(&customers), manifest).await?;

        let sales = self
            .generator
            .generate_sales(counts.sales)
            .map_err(at(DatasetKind::Sales))?;
        self.persist(Dataset::Sales(&sales), manifest).await?;

        let employees = self
            .generator
            .generate_employees(counts.employees)
            .map_err(at(DatasetKind::Employees))?;
        self.persist(Dataset::Employees(&employees), manifest).await?;

        let financial = self
            .generator
            .generate_financial_periods(counts.financial_periods)
            .map_err(at(DatasetKind::Financial))?;
        self.persist(Dataset::Financial(&financial), manifest).await?;

        let operations = self
            .generator
            .generate_operations(counts.operations)
            .map_err(at(DatasetKind::Operations))?;
        self.persist(Dataset::Operations(&operations), manifest).await?;

        Ok(GeneratedTables {
            customers,
            sales,
            employees,
            financial,
            operations,
        })
    }

    async fn persist(
        &self,
        dataset: Dataset<'_>,
        manifest: &mut Manifest,
    ) -> Result<(), TableFailure> {
        let kind = dataset.kind();
        self.store
            .write_table(&dataset)
            .await
            .map_err(|e| (kind, GenerateError::storage(kind.name(), e)))?;
        manifest.record(&dataset);
        Ok(())
    }

    /// 清除本次未写成的表，再写 partial 清单
    async fn abandon(&self, failed: DatasetKind, manifest: &mut Manifest) {
        manifest.mark_failed(failed);
        manifest.degenerate_fallbacks = self.generator.degenerate_fallbacks();
        for kind in DatasetKind::ALL {
            if manifest.dataset(kind.name()).is_some() {
                continue;
            }
            if let Err(e) = self.store.clear_table(kind).await {
                warn!("清除旧表 {} 失败: {}", kind.table_name(), e);
            }
        }
        if let Err(e) = self.store.write_manifest(manifest).await {
            error!("写入部分清单失败: {}", e);
        }
    }
}
