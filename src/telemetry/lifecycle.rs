//! # 追踪生命周期管理
//!
//! 启动时构建导出器与 `SdkTracerProvider` 并注册为全局 provider，
//! 进程退出前刷新并关闭。

use super::{ServiceTracer, TRACER_NAME};
use crate::config::{ExporterKind, TelemetryConfig};
use crate::error::{Result, ServiceError};
use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::{error, info};

/// 进程级追踪系统
///
/// 只能通过 [`Telemetry::shutdown`] 关闭一次。
#[derive(Debug)]
pub struct Telemetry {
    provider: SdkTracerProvider,
    tracer: ServiceTracer,
}

impl Telemetry {
    /// 按配置初始化追踪系统并注册全局 provider
    pub fn init(config: &TelemetryConfig) -> Result<Self> {
        let builder = SdkTracerProvider::builder().with_resource(build_resource(config));

        let provider = match config.exporter {
            ExporterKind::Stdout => builder
                .with_batch_exporter(opentelemetry_stdout::SpanExporter::default())
                .build(),
            ExporterKind::Otlp => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .with_endpoint(config.otlp_endpoint.clone())
                    .build()
                    .map_err(|e| {
                        ServiceError::telemetry_with_source("OTLP 导出器创建失败", e)
                    })?;
                builder.with_batch_exporter(exporter).build()
            }
            ExporterKind::None => builder.build(),
        };

        global::set_tracer_provider(provider.clone());

        info!(
            component = "telemetry",
            service = %config.service_name,
            exporter = ?config.exporter,
            "追踪系统初始化完成"
        );

        Ok(Self::from_provider(provider))
    }

    /// 包装已构建的 provider（不注册为全局 provider）
    #[must_use]
    pub fn from_provider(provider: SdkTracerProvider) -> Self {
        let tracer = provider.tracer(TRACER_NAME);
        Self { provider, tracer }
    }

    /// 注入到各层的 tracer
    #[must_use]
    pub fn tracer(&self) -> ServiceTracer {
        self.tracer.clone()
    }

    /// 刷新缓冲中的 span 并释放导出器资源；失败只记录日志
    pub fn shutdown(self) {
        match self.provider.shutdown() {
            Ok(()) => info!(component = "telemetry", "追踪系统已关闭"),
            Err(e) => error!(component = "telemetry", error = %e, "追踪系统关闭失败"),
        }
    }
}

fn build_resource(config: &TelemetryConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.service_version.clone()),
            KeyValue::new("environment", config.environment.clone()),
        ])
        .build()
}
