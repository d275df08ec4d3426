use crate::generate::error::{checked_count, GenerateError};
use crate::generate::model::OperationRecord;
use crate::generate::sales::PRODUCTS;
use crate::generate::sampling::{
    count_sample, dist_err, guarded_ratio, uniform_date, Categorical, DegenerateTally,
};
use chrono::NaiveDate;
use log::info;
use rand::Rng;
use rand_distr::{Beta, Distribution, Gamma, LogNormal, Normal, Poisson};

pub const SUPPLIERS: &[&str] = &["Supplier_A", "Supplier_B", "Supplier_C", "Supplier_D"];

/// 抽样得到的基础字段
#[derive(Debug, Clone)]
pub struct OperationDraw {
    pub operation_id: String,
    pub date: NaiveDate,
    pub supplier: String,
    pub warehouse: String,
    pub product_id: String,
    pub order_quantity: u32,
    /// 到货短缺数量（泊松）
    pub shortfall: u32,
    pub lead_time_days: f64,
    pub unit_cost: f64,
    pub quality_score: f64,
    pub delivery_performance: f64,
    pub inventory_turnover: f64,
    pub stockout_incidents: u32,
    pub carrying_cost_rate: f64,
    pub demand_forecast: f64,
    /// 实际需求相对预测的乘数
    pub demand_factor: f64,
}

/// 1 - |actual - forecast| / forecast；forecast 为 0 时走兜底值
pub fn forecast_accuracy(
    actual_demand: f64,
    demand_forecast: f64,
    row_id: &str,
    tally: &mut DegenerateTally,
) -> f64 {
    match guarded_ratio((actual_demand - demand_forecast).abs(), demand_forecast) {
        Some(miss) => 1.0 - miss,
        None => tally.fallback(row_id, "forecast_accuracy"),
    }
}

impl OperationRecord {
    pub fn from_draw(d: OperationDraw, tally: &mut DegenerateTally) -> Self {
        let received_quantity = d.order_quantity.saturating_sub(d.shortfall);
        let actual_demand = (d.demand_forecast * d.demand_factor).max(0.0);
        let forecast_accuracy =
            forecast_accuracy(actual_demand, d.demand_forecast, &d.operation_id, tally);
        let total_cost = received_quantity as f64 * d.unit_cost;
        let carrying_cost = total_cost * d.carrying_cost_rate;

        Self {
            operation_id: d.operation_id,
            date: d.date,
            supplier: d.supplier,
            warehouse: d.warehouse,
            product_id: d.product_id,
            order_quantity: d.order_quantity,
            received_quantity,
            lead_time_days: d.lead_time_days,
            unit_cost: d.unit_cost,
            quality_score: d.quality_score,
            delivery_performance: d.delivery_performance,
            inventory_turnover: d.inventory_turnover,
            stockout_incidents: d.stockout_incidents,
            carrying_cost_rate: d.carrying_cost_rate,
            demand_forecast: d.demand_forecast,
            actual_demand,
            forecast_accuracy,
            total_cost,
            carrying_cost,
        }
    }
}

struct OperationDistributions {
    supplier: Categorical,
    warehouse: Categorical,
    product: Categorical,
    order_quantity: Poisson<f64>,
    shortfall: Poisson<f64>,
    lead_time: Gamma<f64>,
    unit_cost: LogNormal<f64>,
    quality: Beta<f64>,
    delivery: Beta<f64>,
    turnover: Gamma<f64>,
    stockouts: Poisson<f64>,
    forecast: LogNormal<f64>,
    demand_factor: Normal<f64>,
}

impl OperationDistributions {
    fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            supplier: Categorical::uniform("supplier", SUPPLIERS)?,
            warehouse: Categorical::uniform(
                "warehouse",
                &[
                    "Warehouse_North",
                    "Warehouse_South",
                    "Warehouse_East",
                    "Warehouse_West",
                ],
            )?,
            product: Categorical::uniform("product_id", PRODUCTS)?,
            order_quantity: Poisson::new(100.0).map_err(dist_err("order_quantity"))?,
            shortfall: Poisson::new(2.0).map_err(dist_err("received_quantity"))?,
            lead_time: Gamma::new(2.0, 3.0).map_err(dist_err("lead_time_days"))?,
            unit_cost: LogNormal::new(2.0, 0.3).map_err(dist_err("unit_cost"))?,
            quality: Beta::new(8.0, 2.0).map_err(dist_err("quality_score"))?,
            delivery: Beta::new(7.0, 2.0).map_err(dist_err("delivery_performance"))?,
            turnover: Gamma::new(3.0, 2.0).map_err(dist_err("inventory_turnover"))?,
            stockouts: Poisson::new(0.5).map_err(dist_err("stockout_incidents"))?,
            forecast: LogNormal::new(4.0, 0.5).map_err(dist_err("demand_forecast"))?,
            demand_factor: Normal::new(1.0, 0.2).map_err(dist_err("actual_demand"))?,
        })
    }
}

/// 每行抽样顺序：date, supplier, warehouse, product_id, order_quantity, shortfall,
/// lead_time_days, unit_cost, quality_score, delivery_performance,
/// inventory_turnover, stockout_incidents, carrying_cost_rate, demand_forecast,
/// demand_factor
pub fn generate_operations<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    window_start: NaiveDate,
    window_end: NaiveDate,
    tally: &mut DegenerateTally,
) -> Result<Vec<OperationRecord>, GenerateError> {
    let n = checked_count("operations", count)?;
    let d = OperationDistributions::new()?;
    info!("开始生成运营数据: {} 条", n);

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let draw = OperationDraw {
            operation_id: format!("OPS_{:06}", i + 1),
            date: uniform_date(rng, window_start, window_end),
            supplier: d.supplier.sample(rng),
            warehouse: d.warehouse.sample(rng),
            product_id: d.product.sample(rng),
            order_quantity: count_sample(&d.order_quantity, rng),
            shortfall: count_sample(&d.shortfall, rng),
            lead_time_days: d.lead_time.sample(rng),
            unit_cost: d.unit_cost.sample(rng),
            quality_score: (d.quality.sample(rng) * 10.0).clamp(0.0, 10.0),
            delivery_performance: d.delivery.sample(rng).clamp(0.0, 1.0),
            inventory_turnover: d.turnover.sample(rng),
            stockout_incidents: count_sample(&d.stockouts, rng),
            carrying_cost_rate: rng.gen_range(0.15..0.25),
            demand_forecast: d.forecast.sample(rng),
            demand_factor: d.demand_factor.sample(rng),
        };
        rows.push(OperationRecord::from_draw(draw, tally));
    }

    info!(
        "运营数据生成完成: {} 条，预测准确率兜底 {} 次",
        rows.len(),
        tally.fallbacks
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn draw(order: u32, shortfall: u32, forecast: f64, factor: f64) -> OperationDraw {
        OperationDraw {
            operation_id: "OPS_000001".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            supplier: "Supplier_A".to_string(),
            warehouse: "Warehouse_North".to_string(),
            product_id: "Product_A".to_string(),
            order_quantity: order,
            shortfall,
            lead_time_days: 4.0,
            unit_cost: 7.5,
            quality_score: 8.0,
            delivery_performance: 0.8,
            inventory_turnover: 6.0,
            stockout_incidents: 0,
            carrying_cost_rate: 0.2,
            demand_forecast: forecast,
            demand_factor: factor,
        }
    }

    #[test]
    fn zero_forecast_uses_fallback() {
        let mut tally = DegenerateTally::default();
        let row = OperationRecord::from_draw(draw(100, 1, 0.0, 1.3), &mut tally);
        assert_eq!(row.forecast_accuracy, 0.0);
        assert!(!row.forecast_accuracy.is_nan());
        assert_eq!(tally.fallbacks, 1);
    }

    #[test]
    fn shortfall_larger_than_order_clamps_to_zero() {
        let mut tally = DegenerateTally::default();
        let row = OperationRecord::from_draw(draw(1, 4, 50.0, -0.5), &mut tally);
        assert_eq!(row.received_quantity, 0);
        assert_eq!(row.actual_demand, 0.0);
        assert_eq!(row.total_cost, 0.0);
        assert_eq!(row.forecast_accuracy, 0.0);
    }

    #[test]
    fn derived_costs_and_accuracy() {
        let mut tally = DegenerateTally::default();
        let row = OperationRecord::from_draw(draw(100, 2, 50.0, 1.1), &mut tally);
        assert_eq!(row.received_quantity, 98);
        assert_eq!(row.total_cost, 98.0 * 7.5);
        assert_eq!(row.carrying_cost, row.total_cost * 0.2);
        let expected = 1.0 - (row.actual_demand - 50.0).abs() / 50.0;
        assert_eq!(row.forecast_accuracy, expected);
    }

    #[test]
    fn generated_rows_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tally = DegenerateTally::default();
        let rows = generate_operations(
            &mut rng,
            5_000,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            &mut tally,
        )
        .unwrap();
        for r in &rows {
            assert!(r.received_quantity <= r.order_quantity);
            assert!(r.actual_demand >= 0.0);
            assert!((0.0..=1.0).contains(&r.delivery_performance));
            assert!((0.0..=10.0).contains(&r.quality_score));
            assert!(SUPPLIERS.contains(&r.supplier.as_str()));
        }
        assert_eq!(rows[4_999].operation_id, "OPS_005000");
    }
}
