use crate::generate::error::{checked_count, GenerateError};
use crate::generate::model::Employee;
use crate::generate::sampling::{count_sample, dist_err, uniform_date, Categorical};
use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use log::info;
use rand::Rng;
use rand_distr::{Bernoulli, Beta, Distribution, Exp, LogNormal, Normal, Poisson};

pub const DEPARTMENTS: &[&str] = &["Sales", "Marketing", "Engineering", "HR", "Finance", "Operations"];

const DAYS_PER_YEAR: f64 = 365.25;

/// 员工生成参数；`as_of` 是计算司龄用的“当前日期”，由调用方注入
#[derive(Debug, Clone, Copy)]
pub struct EmployeeParams {
    pub hire_start: NaiveDate,
    pub hire_end: NaiveDate,
    pub manager_pool: i64,
    pub as_of: NaiveDate,
}

pub fn tenure_years(hire_date: NaiveDate, as_of: NaiveDate) -> f64 {
    (as_of - hire_date).num_days() as f64 / DAYS_PER_YEAR
}

/// 第 i 行（0 起）可选的经理序号区间 [1, min(pool, i)]，第 0 行没有经理
fn manager_ordinal<R: Rng + ?Sized>(rng: &mut R, row: usize, pool: usize) -> Option<usize> {
    if row == 0 {
        return None;
    }
    let upper = row.min(pool).max(1);
    Some(rng.gen_range(1..=upper))
}

struct EmployeeDistributions {
    department: Categorical,
    position: Categorical,
    salary: LogNormal<f64>,
    performance: Normal<f64>,
    satisfaction: Normal<f64>,
    training: Poisson<f64>,
    projects: Poisson<f64>,
    absenteeism: Poisson<f64>,
    overtime: Exp<f64>,
    promotion: Bernoulli,
    flight_risk: Beta<f64>,
}

impl EmployeeDistributions {
    fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            department: Categorical::uniform("department", DEPARTMENTS)?,
            position: Categorical::uniform(
                "position",
                &["Manager", "Senior", "Junior", "Intern", "Director", "VP"],
            )?,
            salary: LogNormal::new(10.8, 0.4).map_err(dist_err("salary"))?,
            performance: Normal::new(3.5, 0.8).map_err(dist_err("performance_score"))?,
            satisfaction: Normal::new(7.0, 1.5).map_err(dist_err("satisfaction_score"))?,
            training: Poisson::new(40.0).map_err(dist_err("training_hours"))?,
            projects: Poisson::new(8.0).map_err(dist_err("projects_completed"))?,
            absenteeism: Poisson::new(5.0).map_err(dist_err("absenteeism_days"))?,
            // 均值 10 小时
            overtime: Exp::new(0.1).map_err(dist_err("overtime_hours"))?,
            promotion: Bernoulli::new(0.3).map_err(dist_err("promotion_eligible"))?,
            flight_risk: Beta::new(2.0, 8.0).map_err(dist_err("flight_risk"))?,
        })
    }
}

/// 每行抽样顺序：hire_date, first_name, last_name, email, department, position,
/// salary, performance_score, satisfaction_score, training_hours,
/// projects_completed, absenteeism_days, overtime_hours, manager_id,
/// promotion_eligible, flight_risk
pub fn generate_employees<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    params: &EmployeeParams,
) -> Result<Vec<Employee>, GenerateError> {
    let n = checked_count("employees", count)?;
    let pool = checked_count("manager pool", params.manager_pool)?;
    if n > 1 && pool == 0 {
        return Err(GenerateError::invalid(
            "manager pool must be > 0 when generating more than one employee",
        ));
    }
    let d = EmployeeDistributions::new()?;
    info!("开始生成员工数据: {} 条 (as_of={})", n, params.as_of);

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let hire_date = uniform_date(rng, params.hire_start, params.hire_end);
        rows.push(Employee {
            employee_id: format!("EMP_{:05}", i + 1),
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
            department: d.department.sample(rng),
            position: d.position.sample(rng),
            hire_date,
            salary: d.salary.sample(rng),
            performance_score: d.performance.sample(rng).clamp(0.0, 5.0),
            satisfaction_score: d.satisfaction.sample(rng).clamp(0.0, 10.0),
            training_hours: count_sample(&d.training, rng),
            projects_completed: count_sample(&d.projects, rng),
            absenteeism_days: count_sample(&d.absenteeism, rng),
            overtime_hours: d.overtime.sample(rng),
            manager_id: manager_ordinal(rng, i, pool).map(|m| format!("EMP_{:05}", m)),
            tenure_years: tenure_years(hire_date, params.as_of),
            promotion_eligible: d.promotion.sample(rng),
            flight_risk: d.flight_risk.sample(rng).clamp(0.0, 1.0),
        });
    }

    info!("员工数据生成完成: {} 条", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> EmployeeParams {
        EmployeeParams {
            hire_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            hire_end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            manager_pool: 99,
            as_of: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        }
    }

    fn ordinal(id: &str) -> usize {
        id["EMP_".len()..].parse().unwrap()
    }

    #[test]
    fn managers_are_strictly_earlier() {
        let mut rng = StdRng::seed_from_u64(42);
        let rows = generate_employees(&mut rng, 1_000, &params()).unwrap();
        assert!(rows[0].manager_id.is_none());
        for e in rows.iter().skip(1) {
            let m = e.manager_id.as_deref().expect("non-root employee has a manager");
            assert!(ordinal(m) < ordinal(&e.employee_id));
            assert!(ordinal(m) <= 99);
        }
    }

    #[test]
    fn tenure_uses_injected_date() {
        let mut rng = StdRng::seed_from_u64(8);
        let p = params();
        for e in generate_employees(&mut rng, 200, &p).unwrap() {
            let expected = (p.as_of - e.hire_date).num_days() as f64 / 365.25;
            assert_eq!(e.tenure_years, expected);
            assert!(e.tenure_years > 0.0);
        }
    }

    #[test]
    fn bounded_scores() {
        let mut rng = StdRng::seed_from_u64(13);
        for e in generate_employees(&mut rng, 1_000, &params()).unwrap() {
            assert!((0.0..=1.0).contains(&e.flight_risk));
            assert!((0.0..=5.0).contains(&e.performance_score));
            assert!((0.0..=10.0).contains(&e.satisfaction_score));
            assert!(e.overtime_hours >= 0.0);
            assert!(DEPARTMENTS.contains(&e.department.as_str()));
        }
    }

    #[test]
    fn single_employee_needs_no_manager_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = params();
        p.manager_pool = 0;
        let rows = generate_employees(&mut rng, 1, &p).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(generate_employees(&mut rng, 2, &p).is_err());
    }
}
