use crate::storage::entity::{
    customer, employee, financial_statement, generation_manifest, operation, sales_transaction,
};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use std::time::Duration;

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    // 单写者，按表开关连接
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    // 启用 WAL 模式
    let _ = db
        .execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;

    create_table(&db, customer::Entity).await?;
    create_table(&db, sales_transaction::Entity).await?;
    create_table(&db, employee::Entity).await?;
    create_table(&db, financial_statement::Entity).await?;
    create_table(&db, operation::Entity).await?;
    create_table(&db, generation_manifest::Entity).await?;

    info!("数据库连接已建立: {}", db_url);

    Ok(db)
}

// 创建表（如果不存在）
async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let stmt = builder.build(schema.create_table_from_entity(entity).if_not_exists());
    db.execute(stmt).await?;
    Ok(())
}
