//! # Person API
//!
//! 人员记录 HTTP 服务：创建与列出人员记录，请求处理与持久化的每一步
//! 都包裹在 OpenTelemetry span 中。

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod persons;
pub mod server;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Result, ServiceError};
