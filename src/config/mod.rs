//! # 配置管理模块
//!
//! 处理应用配置加载、验证和管理

mod app_config;
mod database;
mod telemetry;

pub use app_config::{AppConfig, ServerConfig};
pub use database::DatabaseConfig;
pub use telemetry::{ExporterKind, TelemetryConfig};

use crate::error::{Result, ServiceError};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

/// 当前运行环境对应的默认配置文件路径
#[must_use]
pub fn default_config_path() -> PathBuf {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    PathBuf::from(format!("config/config.{env}.toml"))
}

/// 加载配置
///
/// 显式指定的配置文件必须存在；未指定时读取 `config/config.{RUST_ENV}.toml`，
/// 该文件不存在则使用内置默认值。
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let config = match explicit_path {
        Some(path) => load_config_from(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config_from(&path)?
            } else {
                info!(
                    component = "config",
                    path = %path.display(),
                    "配置文件不存在，使用默认配置"
                );
                AppConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// 从指定文件加载配置
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ServiceError::config(format!(
            "配置文件不存在: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ServiceError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
    })?;

    let config: AppConfig = toml::from_str(&content)?;
    info!(component = "config", path = %path.display(), "配置文件加载完成");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_config_from_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[telemetry]
exporter = "none"
"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.telemetry.exporter, ExporterKind::None);
        assert_eq!(config.telemetry.service_name, "person-api");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/person-api.toml"))).unwrap_err();
        assert!(matches!(err, ServiceError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ServiceError::Config { .. }));
    }

    #[test]
    fn test_loaded_config_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("端口"));
    }

    #[test]
    fn test_shipped_dev_config_is_valid() {
        let config: AppConfig =
            toml::from_str(include_str!("../../config/config.dev.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.telemetry.service_name, "mygoapp");
        assert_eq!(config.telemetry.exporter, ExporterKind::Stdout);
    }
}
