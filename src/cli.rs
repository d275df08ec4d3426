use crate::config::{parse_month, parse_value, GeneratorConfig, StoreKind};
use crate::generate::error::GenerateError;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "用法: bizgen [--seed N] [--customers N] [--sales N] [--employees N] \
[--periods N] [--operations N] [--base-month YYYY-MM] [--store csv|sqlite] [--out DIR] [--db URL] [--help]";

/// 命令行覆盖项；未给出的保持环境变量/默认值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub seed: Option<u64>,
    pub customers: Option<i64>,
    pub sales: Option<i64>,
    pub employees: Option<i64>,
    pub periods: Option<i64>,
    pub operations: Option<i64>,
    pub base_month: Option<NaiveDate>,
    pub store: Option<StoreKind>,
    pub out: Option<PathBuf>,
    pub db: Option<String>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self, GenerateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut out = CliArgs::default();
        let mut i = 0usize;
        while i < tokens.len() {
            let flag = tokens[i].as_str();
            if matches!(flag, "--help" | "-h") {
                out.help = true;
                i += 1;
                continue;
            }
            // 支持 --flag=value 与 --flag value 两种写法
            let (name, inline) = match flag.split_once('=') {
                Some((n, v)) => (n, Some(v.to_string())),
                None => (flag, None),
            };
            let value = match inline {
                Some(v) => v,
                None => {
                    i += 1;
                    tokens
                        .get(i)
                        .cloned()
                        .ok_or_else(|| GenerateError::invalid(format!("{name} requires a value")))?
                }
            };
            match name {
                "--seed" => out.seed = Some(parse_value(name, &value)?),
                "--customers" => out.customers = Some(parse_value(name, &value)?),
                "--sales" => out.sales = Some(parse_value(name, &value)?),
                "--employees" => out.employees = Some(parse_value(name, &value)?),
                "--periods" => out.periods = Some(parse_value(name, &value)?),
                "--operations" => out.operations = Some(parse_value(name, &value)?),
                "--base-month" => out.base_month = Some(parse_month(&value)?),
                "--store" => out.store = Some(StoreKind::from_str(&value)?),
                "--out" => out.out = Some(PathBuf::from(value)),
                "--db" => out.db = Some(value),
                other => {
                    return Err(GenerateError::invalid(format!("unknown flag '{other}'")));
                }
            }
            i += 1;
        }
        Ok(out)
    }

    /// 覆盖到配置上；只改客户数时，客户 ID 空间随之变化
    pub fn apply(&self, cfg: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(n) = self.customers {
            if cfg.customer_id_space == cfg.counts.customers {
                cfg.customer_id_space = n;
            }
            cfg.counts.customers = n;
        }
        if let Some(n) = self.sales {
            cfg.counts.sales = n;
        }
        if let Some(n) = self.employees {
            cfg.counts.employees = n;
        }
        if let Some(n) = self.periods {
            cfg.counts.financial_periods = n;
        }
        if let Some(n) = self.operations {
            cfg.counts.operations = n;
        }
        if let Some(m) = self.base_month {
            cfg.base_month = m;
        }
        if let Some(s) = self.store {
            cfg.store = s;
        }
        if let Some(dir) = &self.out {
            cfg.output_dir = dir.clone();
        }
        if let Some(db) = &self.db {
            cfg.database_url = db.clone();
        }
    }
}
