use crate::generate::error::GenerateError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::fmt::Display;

/// 派生字段除零 / NaN / ∞ 时的兜底值
pub const DEGENERATE_FALLBACK: f64 = 0.0;

pub fn dist_err<E: Display>(what: &'static str) -> impl FnOnce(E) -> GenerateError {
    move |e| GenerateError::Distribution(format!("{what}: {e}"))
}

/// 带权重的分类字段
pub struct Categorical {
    labels: &'static [&'static str],
    index: WeightedIndex<f64>,
}

impl Categorical {
    pub fn weighted(
        what: &'static str,
        labels: &'static [&'static str],
        weights: &[f64],
    ) -> Result<Self, GenerateError> {
        if labels.len() != weights.len() {
            return Err(GenerateError::Distribution(format!(
                "{what}: {} labels but {} weights",
                labels.len(),
                weights.len()
            )));
        }
        let index = WeightedIndex::new(weights).map_err(dist_err(what))?;
        Ok(Self { labels, index })
    }

    pub fn uniform(
        what: &'static str,
        labels: &'static [&'static str],
    ) -> Result<Self, GenerateError> {
        let weights = vec![1.0; labels.len()];
        Self::weighted(what, labels, &weights)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.labels[self.index.sample(rng)].to_string()
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }
}

/// [start, end] 闭区间内均匀抽取日期
pub fn uniform_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.gen_range(0..=span))
}

/// [start 00:00:00, end 00:00:00] 内均匀抽取时间点（秒级）
pub fn uniform_datetime<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> NaiveDateTime {
    let start_dt = start.and_time(NaiveTime::MIN);
    let end_dt = end.and_time(NaiveTime::MIN);
    let span = (end_dt - start_dt).num_seconds().max(0);
    start_dt + Duration::seconds(rng.gen_range(0..=span))
}

/// 泊松抽样转计数
pub fn count_sample<D: Distribution<f64>, R: Rng + ?Sized>(dist: &D, rng: &mut R) -> u32 {
    dist.sample(rng).max(0.0) as u32
}

pub fn guarded_ratio(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        return None;
    }
    let v = num / den;
    v.is_finite().then_some(v)
}

/// 非致命的退化计算计数；每次兜底都会记一条 warn
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateTally {
    pub fallbacks: usize,
}

impl DegenerateTally {
    pub fn ratio(&mut self, num: f64, den: f64, row_id: &str, field: &str) -> f64 {
        match guarded_ratio(num, den) {
            Some(v) => v,
            None => self.fallback(row_id, field),
        }
    }

    pub fn fallback(&mut self, row_id: &str, field: &str) -> f64 {
        self.fallbacks += 1;
        warn!(
            "退化计算: {} 的 {} 无法求值，使用兜底值 {}",
            row_id, field, DEGENERATE_FALLBACK
        );
        DEGENERATE_FALLBACK
    }
}
