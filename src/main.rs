//! # Person API 主程序

use clap::Parser;
use person_api::{
    Result, config, database,
    error::Context as _,
    logging,
    server::{self, AppState},
    telemetry::Telemetry,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "person-api", version, about)]
struct Cli {
    /// 配置文件路径，默认 config/config.{RUST_ENV}.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 基础日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(Some(&cli.log_level));

    if let Err(e) = run(cli).await {
        error!(component = "main", error = %e, "服务启动失败");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
        config.validate()?;
    }

    let telemetry = Telemetry::init(&config.telemetry)?;

    // 启动阶段失败同样需要关闭追踪系统
    let result = serve(&config, &telemetry).await;
    telemetry.shutdown();
    result
}

async fn serve(config: &person_api::AppConfig, telemetry: &Telemetry) -> Result<()> {
    let db = database::init_database(&config.database).await?;
    database::run_migrations(&db)
        .await
        .context("数据表初始化失败")?;

    let state = AppState::from_database(Arc::new(db), telemetry.tracer());
    server::serve(&config.server, state).await?;

    info!(component = "main", "服务正常关闭");
    Ok(())
}
