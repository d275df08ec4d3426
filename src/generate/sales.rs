use crate::generate::error::{checked_count, GenerateError};
use crate::generate::model::SalesTransaction;
use crate::generate::sampling::{dist_err, uniform_datetime, Categorical};
use chrono::{NaiveDate, NaiveDateTime};
use fake::faker::name::en::Name;
use fake::Fake;
use log::info;
use rand::Rng;
use rand_distr::{Beta, Distribution, LogNormal, Normal};

pub const PRODUCTS: &[&str] = &["Product_A", "Product_B", "Product_C", "Product_D", "Product_E"];
pub const MAX_DISCOUNT: f64 = 0.3;

/// 抽样得到的基础字段；收入类字段全部由此派生
#[derive(Debug, Clone)]
pub struct SaleDraw {
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
    pub profit_margin: f64,
}

impl SalesTransaction {
    pub fn from_draw(d: SaleDraw) -> Self {
        let gross_revenue = d.quantity as f64 * d.unit_price;
        let net_revenue = gross_revenue * (1.0 - d.discount);
        let profit = net_revenue * d.profit_margin;
        Self {
            transaction_id: d.transaction_id,
            customer_id: d.customer_id,
            product_id: d.product_id,
            category: d.category,
            quantity: d.quantity,
            unit_price: d.unit_price,
            discount: d.discount,
            transaction_date: d.transaction_date,
            sales_rep: d.sales_rep,
            region: d.region,
            channel: d.channel,
            payment_method: d.payment_method,
            gross_revenue,
            net_revenue,
            profit_margin: d.profit_margin,
            profit,
        }
    }
}

struct SalesDistributions {
    product: Categorical,
    category: Categorical,
    unit_price: LogNormal<f64>,
    discount: Beta<f64>,
    region: Categorical,
    channel: Categorical,
    payment: Categorical,
    profit_margin: Normal<f64>,
}

impl SalesDistributions {
    fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            product: Categorical::uniform("product_id", PRODUCTS)?,
            category: Categorical::uniform(
                "category",
                &["Electronics", "Clothing", "Home", "Sports", "Books"],
            )?,
            unit_price: LogNormal::new(3.0, 0.5).map_err(dist_err("unit_price"))?,
            discount: Beta::new(1.0, 9.0).map_err(dist_err("discount"))?,
            region: Categorical::uniform("region", &["North", "South", "East", "West"])?,
            channel: Categorical::weighted(
                "channel",
                &["Online", "Store", "Phone"],
                &[0.6, 0.3, 0.1],
            )?,
            payment: Categorical::weighted(
                "payment_method",
                &["Credit Card", "Debit Card", "Cash", "PayPal"],
                &[0.5, 0.3, 0.1, 0.1],
            )?,
            profit_margin: Normal::new(0.25, 0.1).map_err(dist_err("profit_margin"))?,
        })
    }
}

/// customer_id 在 [1, customer_id_space] 内均匀抽取，不校验客户是否真实存在。
///
/// 每行抽样顺序：customer_id, product_id, category, quantity, unit_price,
/// discount, transaction_date, sales_rep, region, channel, payment_method,
/// profit_margin
pub fn generate_sales<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    customer_id_space: i64,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<SalesTransaction>, GenerateError> {
    let n = checked_count("sales", count)?;
    if n > 0 && customer_id_space <= 0 {
        return Err(GenerateError::invalid(format!(
            "customer id space must be > 0, got {customer_id_space}"
        )));
    }
    let d = SalesDistributions::new()?;
    info!("开始生成销售数据: {} 条", n);

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let draw = SaleDraw {
            transaction_id: format!("TXN_{:08}", i + 1),
            customer_id: format!("CUST_{:06}", rng.gen_range(1..=customer_id_space)),
            product_id: d.product.sample(rng),
            category: d.category.sample(rng),
            quantity: rng.gen_range(1..10),
            unit_price: d.unit_price.sample(rng),
            discount: (d.discount.sample(rng) * MAX_DISCOUNT).clamp(0.0, MAX_DISCOUNT),
            transaction_date: uniform_datetime(rng, window_start, window_end),
            sales_rep: Name().fake_with_rng(rng),
            region: d.region.sample(rng),
            channel: d.channel.sample(rng),
            payment_method: d.payment.sample(rng),
            profit_margin: d.profit_margin.sample(rng),
        };
        rows.push(SalesTransaction::from_draw(draw));
    }

    info!("销售数据生成完成: {} 条", rows.len());
    Ok(rows)
}
