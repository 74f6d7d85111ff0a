//! # 追踪配置

use serde::{Deserialize, Serialize};

/// 已完成 span 的导出目标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExporterKind {
    /// 输出到控制台
    #[default]
    Stdout,
    /// 通过 OTLP/HTTP 发送到采集器
    Otlp,
    /// 不导出
    None,
}

/// 追踪配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// 服务名称 (`service.name`)
    pub service_name: String,
    /// 服务版本 (`service.version`)
    pub service_version: String,
    /// 部署环境 (`environment`)
    pub environment: String,
    /// 导出器类型
    pub exporter: ExporterKind,
    /// OTLP/HTTP 采集端点
    pub otlp_endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "demo".to_string(),
            exporter: ExporterKind::Stdout,
            otlp_endpoint: "http://localhost:4318/v1/traces".to_string(),
        }
    }
}
