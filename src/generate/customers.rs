use crate::generate::error::{checked_count, GenerateError};
use crate::generate::model::Customer;
use crate::generate::sampling::{dist_err, uniform_date, Categorical};
use chrono::NaiveDate;
use fake::faker::address::en::{CityName, CountryName, StateName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use log::info;
use rand::Rng;
use rand_distr::{Beta, Distribution, LogNormal, Normal};

pub const SEGMENTS: &[&str] = &["Premium", "Standard", "Basic"];

struct CustomerDistributions {
    gender: Categorical,
    income: LogNormal<f64>,
    education: Categorical,
    segment: Categorical,
    lifetime_value: LogNormal<f64>,
    churn: Beta<f64>,
    satisfaction: Normal<f64>,
    acquisition: Categorical,
}

impl CustomerDistributions {
    fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            gender: Categorical::weighted("gender", &["M", "F", "Other"], &[0.48, 0.48, 0.04])?,
            income: LogNormal::new(10.5, 0.8).map_err(dist_err("income"))?,
            education: Categorical::weighted(
                "education",
                &["High School", "Bachelor", "Master", "PhD"],
                &[0.3, 0.4, 0.25, 0.05],
            )?,
            segment: Categorical::weighted("customer_segment", SEGMENTS, &[0.2, 0.5, 0.3])?,
            lifetime_value: LogNormal::new(7.0, 1.0).map_err(dist_err("lifetime_value"))?,
            churn: Beta::new(2.0, 8.0).map_err(dist_err("churn_probability"))?,
            satisfaction: Normal::new(7.5, 1.5).map_err(dist_err("satisfaction_score"))?,
            acquisition: Categorical::weighted(
                "acquisition_channel",
                &["Online", "Referral", "Social Media", "Direct"],
                &[0.4, 0.3, 0.2, 0.1],
            )?,
        })
    }
}

/// 每行抽样顺序：first_name, last_name, email, age, gender, income, education,
/// city, state, country, registration_date, segment, lifetime_value,
/// churn_probability, satisfaction_score, acquisition_channel
pub fn generate_customers<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<Customer>, GenerateError> {
    let n = checked_count("customers", count)?;
    let d = CustomerDistributions::new()?;
    info!("开始生成客户数据: {} 条", n);

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        rows.push(Customer {
            customer_id: format!("CUST_{:06}", i + 1),
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
            age: rng.gen_range(18..80),
            gender: d.gender.sample(rng),
            income: d.income.sample(rng),
            education: d.education.sample(rng),
            city: CityName().fake_with_rng(rng),
            state: StateName().fake_with_rng(rng),
            country: CountryName().fake_with_rng(rng),
            registration_date: uniform_date(rng, window_start, window_end),
            customer_segment: d.segment.sample(rng),
            lifetime_value: d.lifetime_value.sample(rng),
            churn_probability: d.churn.sample(rng).clamp(0.0, 1.0),
            satisfaction_score: d.satisfaction.sample(rng).clamp(0.0, 10.0),
            acquisition_channel: d.acquisition.sample(rng),
        });
    }

    info!("客户数据生成完成: {} 条", rows.len());
    Ok(rows)
}
