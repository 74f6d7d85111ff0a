//! # 数据库模块
//!
//! 数据库连接和建表管理

use crate::config::DatabaseConfig;
use crate::error::{Result, ServiceError};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{error, info};

/// 内存数据库连接的空闲超时与最长存活时间；连接被回收时库中数据随之丢失
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    info!(
        component = "database",
        url = %config.url,
        max_connections = config.effective_max_connections(),
        "正在连接数据库"
    );

    config.ensure_database_path()?;

    let db = Database::connect(connect_options(config))
        .await
        .map_err(|e| ServiceError::database_with_source("数据库连接失败", e))?;

    info!(component = "database", "数据库连接成功");
    Ok(db)
}

/// 构建连接池参数
fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.effective_max_connections())
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    if config.is_memory_database() {
        options
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    }
    options
}

/// 运行建表迁移（幂等）
pub async fn run_migrations(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    info!(component = "database", "开始运行数据库迁移...");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!(component = "database", "数据库迁移完成");
            Ok(())
        }
        Err(e) => {
            error!(component = "database", error = %e, "数据库迁移失败");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    #[test]
    fn test_memory_database_connection_is_never_recycled() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        let options = connect_options(&config);

        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
        assert_eq!(options.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(options.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
    }

    #[test]
    fn test_file_database_keeps_pool_defaults() {
        let config = DatabaseConfig::default();
        let options = connect_options(&config);

        assert_eq!(options.get_max_connections(), Some(config.max_connections));
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        let db = init_database(&config).await.unwrap();

        run_migrations(&db).await.unwrap();
        run_migrations(&db).await.unwrap();

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM persons",
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.try_get::<i64>("", "n").unwrap(), 0);
    }
}
