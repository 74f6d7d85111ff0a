//! # 日志配置模块
//!
//! 基于 `tracing-subscriber` 的日志初始化，默认关闭数据库查询的详细日志

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 未设置 `RUST_LOG` 时使用的过滤规则
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},person_api=debug,sqlx::query=off,sea_orm::query=warn,sqlx=warn")
}

/// 初始化日志系统
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| default_filter("info").into()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();

    if env::var("RUST_LOG")
        .is_ok_and(|v| v.contains("sqlx::query=info") || v.contains("sqlx::query=debug"))
    {
        tracing::info!("SQLx database query logging enabled");
    }
}
