//! # HTTP 服务器
//!
//! Axum 路由、共享状态与优雅关闭

use crate::config::ServerConfig;
use crate::error::{Context as _, Result, ServiceError};
use crate::persons::{PersonRepository, PersonService, PersonStore, handlers};
use crate::telemetry::ServiceTracer;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    persons: PersonService,
    tracer: ServiceTracer,
}

impl AppState {
    /// 由业务层与 tracer 组装共享状态
    #[must_use]
    pub const fn new(persons: PersonService, tracer: ServiceTracer) -> Self {
        Self { persons, tracer }
    }

    /// 使用数据库连接构建完整的 处理器 → 业务 → 网关 链
    #[must_use]
    pub fn from_database(db: Arc<DatabaseConnection>, tracer: ServiceTracer) -> Self {
        let repository: Arc<dyn PersonRepository> =
            Arc::new(PersonStore::new(db, tracer.clone()));
        Self::new(PersonService::new(repository, tracer.clone()), tracer)
    }

    /// 人员业务层
    #[must_use]
    pub const fn persons(&self) -> &PersonService {
        &self.persons
    }

    /// 处理器开启根 span 使用的 tracer
    #[must_use]
    pub const fn tracer(&self) -> &ServiceTracer {
        &self.tracer
    }
}

/// 创建路由器
///
/// 请求体不设大小上限，任何请求体都会进入处理器 span。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::users_get_handler).post(handlers::users_post_handler),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// 绑定监听地址并运行，直到收到关闭信号且在途请求处理完毕
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let ip = config.host.parse::<IpAddr>().map_err(|e| {
        ServiceError::server_with_source(format!("无效的监听地址 '{}'", config.host), e)
    })?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("绑定监听地址失败: {addr}"))?;
    info!(component = "server", %addr, "HTTP 服务器启动");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::server_with_source("HTTP 服务器运行错误", e))?;

    info!(component = "server", "HTTP 服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(component = "server", error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(component = "server", error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!(component = "server", "收到 Ctrl+C 信号，开始关闭"),
        () = terminate => info!(component = "server", "收到 SIGTERM 信号，开始关闭"),
    }
}
