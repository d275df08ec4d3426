use crate::generate::model::{Dataset, DatasetKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Complete,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: String,
    pub max: String,
}

impl ValueRange {
    fn over<T, I>(values: I) -> Option<Self>
    where
        T: Ord + Clone + Display,
        I: IntoIterator<Item = T>,
    {
        let mut bounds: Option<(T, T)> = None;
        for v in values {
            bounds = Some(match bounds {
                None => (v.clone(), v),
                Some((lo, hi)) => {
                    let lo = if v < lo { v.clone() } else { lo };
                    let hi = if v > hi { v } else { hi };
                    (lo, hi)
                }
            });
        }
        bounds.map(|(lo, hi)| ValueRange {
            min: lo.to_string(),
            max: hi.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub table: String,
    pub records: usize,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppliers: Option<Vec<String>>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset<'_>) -> Self {
        let kind = dataset.kind();
        let mut summary = Self {
            name: kind.name().to_string(),
            table: kind.table_name().to_string(),
            records: dataset.len(),
            columns: kind.columns().iter().map(|c| c.to_string()).collect(),
            date_range: None,
            period_range: None,
            total_revenue: None,
            departments: None,
            suppliers: None,
        };
        match dataset {
            Dataset::Customers(rows) => {
                summary.date_range = ValueRange::over(rows.iter().map(|c| c.registration_date));
            }
            Dataset::Sales(rows) => {
                summary.total_revenue = Some(rows.iter().map(|t| t.net_revenue).sum());
                summary.date_range = ValueRange::over(rows.iter().map(|t| t.transaction_date));
            }
            Dataset::Employees(rows) => {
                summary.departments = Some(unique_in_order(rows.iter().map(|e| &e.department)));
                summary.date_range = ValueRange::over(rows.iter().map(|e| e.hire_date));
            }
            Dataset::Financial(rows) => {
                summary.period_range = ValueRange::over(rows.iter().map(|f| f.period.clone()));
            }
            Dataset::Operations(rows) => {
                summary.suppliers = Some(unique_in_order(rows.iter().map(|o| &o.supplier)));
                summary.date_range = ValueRange::over(rows.iter().map(|o| o.date));
            }
        }
        summary
    }
}

/// 按首次出现顺序去重
fn unique_in_order<'a, I: IntoIterator<Item = &'a String>>(values: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|x| x == v) {
            out.push(v.clone());
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generation_date: DateTime<Utc>,
    pub seed: u64,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_table: Option<String>,
    pub degenerate_fallbacks: usize,
    pub datasets: Vec<DatasetSummary>,
}

impl Manifest {
    pub fn new(generation_date: DateTime<Utc>, seed: u64) -> Self {
        Self {
            generation_date,
            seed,
            status: RunStatus::Complete,
            failed_table: None,
            degenerate_fallbacks: 0,
            datasets: Vec::new(),
        }
    }

    pub fn record(&mut self, dataset: &Dataset<'_>) {
        self.datasets.push(DatasetSummary::from_dataset(dataset));
    }

    pub fn mark_failed(&mut self, kind: DatasetKind) {
        self.status = RunStatus::Partial;
        self.failed_table = Some(kind.name().to_string());
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetSummary> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::model::{FinancialPeriod, Record};
    use chrono::{NaiveDate, TimeZone};

    fn period(p: &str) -> FinancialPeriod {
        FinancialPeriod {
            period: p.to_string(),
            date: NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").unwrap(),
            revenue: 1.0,
            cost_of_goods_sold: 0.5,
            gross_profit: 0.5,
            operating_expenses: 0.3,
            ebitda: 0.2,
            depreciation: 0.03,
            interest_expense: 0.02,
            tax_rate: 0.25,
            cash_flow: 0.15,
            accounts_receivable: 0.15,
            inventory: 0.1,
            accounts_payable: 0.05,
            working_capital: 0.1,
            gross_margin: 0.5,
            operating_margin: 0.2,
            net_income: 0.1125,
            net_margin: 0.1125,
            roa: 0.05625,
            current_ratio: 6.0,
        }
    }

    #[test]
    fn period_range_and_columns() {
        let rows = vec![period("2022-03"), period("2022-01"), period("2022-02")];
        let s = DatasetSummary::from_dataset(&Dataset::Financial(&rows));
        assert_eq!(s.records, 3);
        assert_eq!(s.table, "financial_statements");
        assert_eq!(s.columns.len(), FinancialPeriod::COLUMNS.len());
        let range = s.period_range.unwrap();
        assert_eq!((range.min.as_str(), range.max.as_str()), ("2022-01", "2022-03"));
        assert!(s.total_revenue.is_none());
    }

    #[test]
    fn empty_dataset_has_no_range() {
        let s = DatasetSummary::from_dataset(&Dataset::Operations(&[]));
        assert_eq!(s.records, 0);
        assert!(s.date_range.is_none());
        assert_eq!(s.suppliers, Some(Vec::new()));
    }

    #[test]
    fn unique_keeps_first_appearance_order() {
        let values = vec![
            "HR".to_string(),
            "Sales".to_string(),
            "HR".to_string(),
            "Finance".to_string(),
        ];
        assert_eq!(unique_in_order(values.iter()), vec!["HR", "Sales", "Finance"]);
    }

    #[test]
    fn partial_manifest_serializes_failed_table() {
        let at = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let mut m = Manifest::new(at, 42);
        m.mark_failed(DatasetKind::Financial);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["failed_table"], "financial");
        let back: Manifest = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }
}
