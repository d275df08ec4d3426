use anyhow::Context;
use bizgen::cli::{CliArgs, USAGE};
use bizgen::{AnyStore, BusinessDataGenerator, GeneratorConfig, GeneratorService, StoreKind};
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("bizgen", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    // 加载 .env（不存在也无妨）
    if let Ok(path) = dotenv::dotenv() {
        info!("已加载 {}", path.display());
    }

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = GeneratorConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    if config.store == StoreKind::Csv {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("无法创建输出目录 {}", config.output_dir.display())
        })?;
    } else if let Some(parent) = sqlite_parent_dir(&config.database_url) {
        std::fs::create_dir_all(&parent)
            .with_context(|| format!("无法创建数据库目录 {}", parent.display()))?;
    }

    let store = AnyStore::from_config(&config);
    let mut service = GeneratorService::new(BusinessDataGenerator::new(config), store);
    let data = service.generate_all().await?;

    println!("Generated {} customers", data.customers.len());
    println!("Generated {} sales transactions", data.sales.len());
    println!("Generated {} employees", data.employees.len());
    println!("Generated {} financial periods", data.financial.len());
    println!("Generated {} operations records", data.operations.len());
    let revenue: f64 = data.sales.iter().map(|t| t.net_revenue).sum();
    println!("Total revenue: ${revenue:.2}");
    if data.manifest.degenerate_fallbacks > 0 {
        println!(
            "Degenerate ratios replaced with 0.0: {}",
            data.manifest.degenerate_fallbacks
        );
    }
    Ok(())
}

/// sqlite://data/business.db?mode=rwc → data
fn sqlite_parent_dir(url: &str) -> Option<std::path::PathBuf> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
}
