//! # 应用配置结构定义

use super::{DatabaseConfig, ExporterKind, TelemetryConfig};
use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};

/// 应用主配置结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务器配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 追踪配置
    pub telemetry: TelemetryConfig,
}

/// HTTP 服务器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServiceError::config(format!(
                "无效的服务器端口: {}",
                self.server.port
            )));
        }
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ServiceError::config(format!(
                "无效的监听地址: {}",
                self.server.host
            )));
        }

        if self.database.url.is_empty() {
            return Err(ServiceError::config("数据库URL不能为空"));
        }
        if self.database.max_connections == 0 {
            return Err(ServiceError::config("数据库最大连接数必须大于0"));
        }

        if self.telemetry.service_name.is_empty() {
            return Err(ServiceError::config("service_name 不能为空"));
        }
        if self.telemetry.exporter == ExporterKind::Otlp && self.telemetry.otlp_endpoint.is_empty()
        {
            return Err(ServiceError::config(
                "exporter = \"otlp\" 时必须配置 otlp_endpoint",
            ));
        }

        Ok(())
    }
}
