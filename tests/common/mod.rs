//! 集成测试公共设施：内存数据库 + 内存 span 导出器

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracer, SdkTracerProvider, SpanData};
use person_api::config::DatabaseConfig;
use person_api::database::{init_database, run_migrations};
use person_api::server::{AppState, create_router};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT: Once = Once::new();

/// 初始化测试日志
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
    pub exporter: InMemorySpanExporter,
    _provider: SdkTracerProvider,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_test_env();

        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        let db = Arc::new(init_database(&config).await.expect("connect test db"));
        run_migrations(&db).await.expect("run migrations");

        let (tracer, exporter, provider) = test_tracer();

        let router = create_router(AppState::from_database(db.clone(), tracer));
        Self {
            router,
            db,
            exporter,
            _provider: provider,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, body)
    }

    pub async fn post_users(&self, body: impl Into<Body>) -> (StatusCode, Bytes) {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(body.into())
                .expect("build request"),
        )
        .await
    }

    pub async fn get_users(&self) -> (StatusCode, Bytes) {
        self.send(
            Request::builder()
                .method("GET")
                .uri("/users")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
    }

    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.exporter.get_finished_spans().expect("read spans")
    }

    pub fn reset_spans(&self) {
        self.exporter.reset();
    }
}

/// 同步导出到内存的 tracer，span 结束即可见
pub fn test_tracer() -> (SdkTracer, InMemorySpanExporter, SdkTracerProvider) {
    let exporter = InMemorySpanExporter::default();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    (provider.tracer("person-api-test"), exporter, provider)
}

/// 按名称查找唯一的 span
pub fn span_named<'a>(spans: &'a [SpanData], name: &str) -> &'a SpanData {
    let matches: Vec<_> = spans.iter().filter(|s| s.name == name).collect();
    assert_eq!(matches.len(), 1, "expected exactly one span named {name}");
    matches[0]
}
