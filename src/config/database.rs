//! # 数据库配置

use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 数据库配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data.db".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// 确保数据库路径存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        let Some(path_str) = self.sqlite_file_path() else {
            return Ok(());
        };
        let db_path = Path::new(path_str);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ServiceError::config_with_source(
                        format!("无法创建数据库目录: {}", parent.display()),
                        e,
                    )
                })?;
                info!(component = "database", dir = %parent.display(), "创建数据库目录");
            }
        }

        if !db_path.exists() {
            std::fs::File::create(db_path).map_err(|e| {
                ServiceError::config_with_source(
                    format!("无法创建数据库文件: {}", db_path.display()),
                    e,
                )
            })?;
            info!(component = "database", file = %db_path.display(), "创建数据库文件");
        } else {
            debug!(component = "database", file = %db_path.display(), "数据库文件已存在");
        }

        Ok(())
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 实际使用的最大连接数；内存数据库每个连接都是独立的库，只能使用单连接
    #[must_use]
    pub fn effective_max_connections(&self) -> u32 {
        if self.is_memory_database() {
            1
        } else {
            self.max_connections
        }
    }

    /// SQLite 文件数据库的文件路径（去掉 scheme 和查询参数）
    fn sqlite_file_path(&self) -> Option<&str> {
        if self.is_memory_database() {
            return None;
        }
        let path = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);
        (!path.is_empty()).then_some(path)
    }
}
